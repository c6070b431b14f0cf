mod models;
mod params;
mod postgres;
mod querier;

pub use self::{
    models::{ArticleDetail, ArticleSummary, Comment, Topic, User},
    params::{ArticleListParams, ArticleListQuery, NewComment, Order, SortBy, parse_id},
    postgres::{DBPool, close_db, init_db_from_env, migrate, new_db_pool},
    querier::Querier,
};
