//! List filters and raw pagination input.
//!
//! Filters are exact-match only: a foreign key equality or an enum equality.

use crate::models::{EventType, VehicleType};

/// Page size used when the caller does not ask for one.
pub const DEFAULT_PAGE_LIMIT: u64 = 10;

/// Raw pagination input as supplied by the caller.
///
/// Missing values fall back to `limit = 10`, `offset = 0` once normalized by
/// the service layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PageRequest {
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl PageRequest {
    #[must_use]
    pub fn new(limit: u64, offset: u64) -> Self {
        Self {
            limit: Some(limit),
            offset: Some(offset),
        }
    }

    /// Build a request from raw query-string values.
    ///
    /// Anything that is not a non-negative integer is treated as absent.
    #[must_use]
    pub fn from_query(limit: Option<&str>, offset: Option<&str>) -> Self {
        let parse = |raw: Option<&str>| raw.and_then(|v| v.trim().parse::<u64>().ok());
        Self {
            limit: parse(limit),
            offset: parse(offset),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VehicleFilter {
    #[default]
    All,
    ByUser(i32),
    ByType(VehicleType),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventFilter {
    #[default]
    All,
    ByVehicle(i32),
    ByUser(i32),
    ByType(EventType),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommentFilter {
    #[default]
    All,
    ByEvent(i32),
    ByUser(i32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageFilter {
    #[default]
    All,
    ByEvent(i32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LikeFilter {
    #[default]
    All,
    ByEvent(i32),
    ByUser(i32),
}
