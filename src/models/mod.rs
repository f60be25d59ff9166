//! Request and response records exchanged with the REST API.
//!
//! None of these are mutated locally. Pages hold the last fetched snapshot and replace it
//! wholesale on every successful fetch.

pub mod credit;
pub mod due;
pub mod party;
pub mod stats;
pub mod transaction;
pub mod wire;

pub use credit::{
    AssessmentState, CreditAssessmentData, CreditAssessmentStatus, CreditPoint, ShopOwnership,
};
pub use due::{
    CreateDueData, Due, DueStatus, DueUpdate, Payment, PaymentMethod, PaymentReceipt, PaymentRequest,
};
pub use party::{Identity, LoginResponse, PartyRef, Retailer, Role};
pub use stats::DashboardStats;
pub use transaction::{NewTransaction, Transaction, TransactionStatus};
