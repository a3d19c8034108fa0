/// Sample timestamps are whole seconds since the Unix epoch.
pub type EpochSecs = i64;

/// All wall-clock timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Current time as epoch seconds.
pub fn now_epoch_secs() -> EpochSecs {
    chrono::Utc::now().timestamp()
}
