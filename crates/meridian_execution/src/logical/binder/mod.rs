pub mod bind_query;
pub mod expr_binder;
