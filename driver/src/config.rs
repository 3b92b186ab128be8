use std::net::SocketAddr;
use std::str::FromStr;

use error_stack::{Report, ResultExt};
use rust_decimal::Decimal;
use time::macros::format_description;
use time::UtcOffset;

use kernel::prelude::entity::{FinePolicy, FineRate};
use kernel::KernelError;

use crate::env_or;

const FINE_PER_DAY: &str = "FINE_PER_DAY";
const BUSINESS_UTC_OFFSET: &str = "BUSINESS_UTC_OFFSET";
const SERVER_BIND: &str = "SERVER_BIND";
const RUST_LOG: &str = "RUST_LOG";

const DEFAULT_BUSINESS_UTC_OFFSET: &str = "+00:00";
const DEFAULT_SERVER_BIND: &str = "0.0.0.0:8080";
const DEFAULT_LOG_FILTER: &str =
    "application=info,driver=debug,server=debug,tower_http=debug,sqlx=info";

/// Runtime settings read from the environment (a `.env` file is honoured).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub fine_policy: FinePolicy,
    pub business_offset: UtcOffset,
    pub bind: SocketAddr,
}

impl AppConfig {
    pub fn from_env() -> error_stack::Result<Self, KernelError> {
        let default_rate = FineRate::DEFAULT_PER_DAY.to_string();
        let fine_policy = parse_fine_policy(&env_or(FINE_PER_DAY, &default_rate)?)?;
        let business_offset =
            parse_offset(&env_or(BUSINESS_UTC_OFFSET, DEFAULT_BUSINESS_UTC_OFFSET)?)?;
        let bind = env_or(SERVER_BIND, DEFAULT_SERVER_BIND)?
            .parse::<SocketAddr>()
            .change_context_lazy(|| KernelError::Internal)
            .attach_printable_lazy(|| format!("{SERVER_BIND} must be a socket address"))?;
        tracing::debug!(
            "Loaded config: fine rate {}, business offset {}, bind {}",
            fine_policy.rate().as_ref(),
            business_offset,
            bind
        );
        Ok(Self {
            fine_policy,
            business_offset,
            bind,
        })
    }
}

/// Console log directives. Read before logging starts, so a `.env` entry counts too.
pub fn log_filter() -> String {
    match dotenvy::var(RUST_LOG) {
        Ok(filter) if !filter.trim().is_empty() => filter,
        _ => DEFAULT_LOG_FILTER.to_string(),
    }
}

pub(crate) fn parse_fine_policy(raw: &str) -> error_stack::Result<FinePolicy, KernelError> {
    let rate = Decimal::from_str(raw.trim())
        .change_context_lazy(|| KernelError::Internal)
        .attach_printable_lazy(|| format!("{FINE_PER_DAY} must be a decimal number"))?;
    if rate.is_sign_negative() {
        return Err(Report::new(KernelError::Internal)
            .attach_printable(format!("{FINE_PER_DAY} must not be negative")));
    }
    Ok(FinePolicy::new(FineRate::new(rate)))
}

pub(crate) fn parse_offset(raw: &str) -> error_stack::Result<UtcOffset, KernelError> {
    let format = format_description!("[offset_hour sign:mandatory]:[offset_minute]");
    UtcOffset::parse(raw.trim(), &format)
        .change_context_lazy(|| KernelError::Internal)
        .attach_printable_lazy(|| format!("{BUSINESS_UTC_OFFSET} must look like -03:00"))
}
