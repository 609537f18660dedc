// Domain layer: payload records, the payload trait and ports (interfaces).

pub mod create_user_request;
pub mod model;
pub mod ports;
pub mod product_item;

pub use create_user_request::{Address, CreateUserRequest};
pub use model::{OutputFormat, Payload, PayloadKind, Record, TransformResult};
pub use product_item::ProductItem;
