pub mod compile_time {
    pub mod logging {
        /// Longest message a log event renders; longer messages are clipped
        pub const MAX_LOG_MESSAGE_LENGTH: usize = 4096;

        /// Events retained by the in-memory logger before the oldest are dropped
        /// RESOURCE: Controls memory usage for captured log events
        pub const LOG_BUFFER_SIZE: usize = 10_000;
    }

    pub mod recorder {
        /// Upper bound on the entries an in-memory recorder may be configured to keep
        /// RESOURCE: Caps recorder memory regardless of runtime preference
        pub const MAX_RECORDED_ERRORS: usize = 1024;

        /// Default recorder capacity when no preference is given
        pub const DEFAULT_RECORDED_ERRORS: usize = 256;
    }
}
