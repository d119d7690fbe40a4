pub mod models;

pub use models::{Order, OrderItem, OrderState, OrderTotals, PaymentState};
