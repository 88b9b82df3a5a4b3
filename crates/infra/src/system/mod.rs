use chrono::Utc;

/// Clock abstraction so that the reminder window logic can be exercised
/// in tests at fixed points in time.
pub trait ISys: Send + Sync {
    /// The current unix timestamp in millis
    fn get_timestamp_millis(&self) -> i64;
}

/// The real wall clock, used outside of tests
pub struct RealSys {}
impl ISys for RealSys {
    fn get_timestamp_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// A clock frozen at a given timestamp
pub struct FixedTimeSys(pub i64);
impl ISys for FixedTimeSys {
    fn get_timestamp_millis(&self) -> i64 {
        self.0
    }
}
