//! Dashboard component modules
//!
//! Each component draws from the values it is given plus an `is_loading` flag. While loading
//! it draws a skeleton, never the data it was handed.

pub mod banner;
pub mod credit_status;
pub mod due_payments;
pub mod dues_list;
pub mod footer;
pub mod form_modal;
pub mod header;
pub mod logs;
pub mod payment_reminder;
pub mod retailer_list;
pub mod spinner;
pub mod stats_cards;
pub mod transaction_history;
