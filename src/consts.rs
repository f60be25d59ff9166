pub mod cli_consts {
    //! Dashboard Configuration Constants
    //!
    //! Tunables for the HTTP client, the terminal loop and the dashboard pages,
    //! grouped by functional area.

    use std::time::Duration;

    // =============================================================================
    // ACTIVITY LOG
    // =============================================================================

    /// The maximum number of events to keep in the activity logs.
    pub const MAX_ACTIVITY_LOGS: usize = 100;

    // =============================================================================
    // NETWORK CONFIGURATION
    // =============================================================================

    /// Time allowed to establish a connection to the API.
    pub const HTTP_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Time allowed for a whole request, including reading the body.
    /// Invoice uploads go through the same client, hence the generous value.
    pub const HTTP_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

    // =============================================================================
    // TERMINAL UI
    // =============================================================================

    /// How long the UI waits for a key press before redrawing.
    pub const UI_TICK: Duration = Duration::from_millis(100);

    /// How long the splash screen stays up before the dashboard is shown.
    pub const SPLASH_DURATION: Duration = Duration::from_secs(2);

    /// Number of rows the skeleton placeholders draw while a panel is loading.
    pub const SKELETON_ROWS: usize = 3;

    // =============================================================================
    // CREDIT
    // =============================================================================

    /// Credit utilization (percent) at and above which the gauge turns critical.
    pub const CREDIT_UTILIZATION_ALERT_PERCENT: f64 = 80.0;
}
