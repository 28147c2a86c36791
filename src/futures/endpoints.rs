//! Futures endpoint paths as they appear in request URLs.
//!
//! Paths include the `/derivatives` routing prefix; the signer strips it
//! before hashing.

/// Host for Kraken Futures production API.
pub const FUTURES_HOST: &str = "https://futures.kraken.com";

/// Host for Kraken Futures demo/testnet API.
pub const FUTURES_DEMO_HOST: &str = "https://demo-futures.kraken.com";

/// Private endpoints (authentication required).
pub mod private {
    /// Get account information.
    pub const ACCOUNTS: &str = "/derivatives/api/v3/accounts";

    /// Get open positions.
    pub const OPEN_POSITIONS: &str = "/derivatives/api/v3/openpositions";

    /// Get open orders.
    pub const OPEN_ORDERS: &str = "/derivatives/api/v3/openorders";

    /// Get fills (trade history). Paginated by `lastFillTime`.
    pub const FILLS: &str = "/derivatives/api/v3/fills";

    /// Get tickers.
    pub const TICKERS: &str = "/derivatives/api/v3/tickers";

    /// Send a new order.
    pub const SEND_ORDER: &str = "/derivatives/api/v3/sendorder";

    /// Cancel an order.
    pub const CANCEL_ORDER: &str = "/derivatives/api/v3/cancelorder";

    /// Batch order operations (body is `json=<batch>`).
    pub const BATCH_ORDER: &str = "/derivatives/api/v3/batchorder";
}
