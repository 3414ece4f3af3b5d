//! HTTP integration tests, driving the full router in-process over the
//! memory document store.

mod helpers;

mod admin_test;
mod health_test;
mod rates_test;
mod review_test;
mod shipment_test;
mod tracking_test;
