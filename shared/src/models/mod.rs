//! Data models exchanged with the service desk backend

pub mod billing;
pub mod receipt;
pub mod service;
pub mod service_order;

// Re-exports
pub use billing::{
    Billing, BillingLineItem, BillingLineRef, BillingSubmission, PersistedBilling,
    PersistedLineItem, PriorBilling,
};
pub use receipt::SubmissionReceipt;
pub use service::ServiceDefinition;
pub use service_order::{
    PaymentStatus, ServiceOrder, ServiceOrderLookup, ServiceOrderPayload, ServiceOrderStatus,
    ServiceOrderSummary,
};
