//! Outbound adapters implementing domain ports against external systems.
//!
//! [`mongo`] owns the document-store client and the collection handles the
//! repositories read from.

pub mod mongo;
