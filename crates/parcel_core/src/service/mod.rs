//! Use-case services over the parcel store.

pub mod parcel_service;
