use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Non-negative amount held as whole cents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(u64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub fn from_cents(cents: u64) -> Self {
        Money(cents)
    }

    pub fn from_units(units: u64) -> Self {
        Money(units.saturating_mul(100))
    }

    pub fn saturating_add(self, other: Money) -> Money {
        Money(self.0.saturating_add(other.0))
    }

    /// `None` when `other` is larger.
    pub fn checked_sub(self, other: Money) -> Option<Money> {
        self.0.checked_sub(other.0).map(Money)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}.{:02}", self.0 / 100, self.0 % 100)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyParseError {
    #[error("enter an amount")]
    Empty,
    #[error("'{0}' is not an amount")]
    Invalid(String),
    #[error("at most two decimal places")]
    TooPrecise,
    #[error("amount too large")]
    Overflow,
}

impl FromStr for Money {
    type Err = MoneyParseError;

    /// Accepts `12`, `12.5`, `12.50` and an optional leading `$`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let trimmed = trimmed.strip_prefix('$').unwrap_or(trimmed).trim();
        if trimmed.is_empty() {
            return Err(MoneyParseError::Empty);
        }

        let (whole, frac) = match trimmed.split_once('.') {
            Some((w, f)) => (w, f),
            None => (trimmed, ""),
        };
        let all_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
        if (whole.is_empty() && frac.is_empty()) || !all_digits(whole) || !all_digits(frac) {
            return Err(MoneyParseError::Invalid(s.trim().to_string()));
        }
        if frac.len() > 2 {
            return Err(MoneyParseError::TooPrecise);
        }

        let units: u64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| MoneyParseError::Overflow)?
        };
        let cents: u64 = match frac.len() {
            0 => 0,
            1 => frac.parse::<u64>().map_err(|_| MoneyParseError::Invalid(s.to_string()))? * 10,
            _ => frac.parse().map_err(|_| MoneyParseError::Invalid(s.to_string()))?,
        };

        units
            .checked_mul(100)
            .and_then(|c| c.checked_add(cents))
            .map(Money)
            .ok_or(MoneyParseError::Overflow)
    }
}

/// Value shown by the status indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ready,
    DetectionActive,
    CameraStopped,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Ready => write!(f, "Ready"),
            Status::DetectionActive => write!(f, "Detection Active"),
            Status::CameraStopped => write!(f, "Camera Stopped"),
        }
    }
}

/// Result of comparing what is owed with what was handed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentOutcome {
    Shortfall(Money),
    Change(Money),
    Settled,
}

impl PaymentOutcome {
    pub fn message(&self) -> String {
        match self {
            PaymentOutcome::Shortfall(amount) => format!("Amount still due: {}", amount),
            PaymentOutcome::Change(amount) => format!("Your change is: {}", amount),
            PaymentOutcome::Settled => "Thank you for your purchase!".to_string(),
        }
    }
}

/// In-memory record of one checkout. Lost on exit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub detection_active: bool,
    pub accumulated_price: Money,
    pub total_balance: Money,
    pub status: Status,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            detection_active: false,
            accumulated_price: Money::ZERO,
            total_balance: Money::ZERO,
            status: Status::Ready,
        }
    }
}

impl SessionState {
    pub fn start(&mut self) {
        self.detection_active = true;
        self.status = Status::DetectionActive;
    }

    pub fn stop(&mut self) {
        self.detection_active = false;
        self.status = Status::CameraStopped;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn add_price(&mut self, amount: Money) {
        self.accumulated_price = self.accumulated_price.saturating_add(amount);
    }

    pub fn add_balance(&mut self, amount: Money) {
        self.total_balance = self.total_balance.saturating_add(amount);
    }

    pub fn payment_outcome(&self) -> PaymentOutcome {
        let (price, balance) = (self.accumulated_price, self.total_balance);
        if let Some(due) = price.checked_sub(balance).filter(|d| *d > Money::ZERO) {
            PaymentOutcome::Shortfall(due)
        } else if let Some(change) = balance.checked_sub(price).filter(|c| *c > Money::ZERO) {
            PaymentOutcome::Change(change)
        } else {
            PaymentOutcome::Settled
        }
    }
}
