//! Aggregates module
pub mod product;
pub mod order;
pub mod stream;
pub mod wishlist;
pub mod user;

pub use product::{Category, Product};
pub use order::{NewOrder, Order, OrderLine, OrderStatus};
pub use stream::{StatusCounts, Stream, StreamListing, StreamStatistics, StreamTotals};
pub use user::User;
pub use wishlist::{like_redirect_target, WishListItem, WishToggle};
