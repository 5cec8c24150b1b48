pub mod accountant;
pub mod coordinator;
pub mod machine;
pub mod reconcile;
pub mod scheduler;
pub mod shift;
