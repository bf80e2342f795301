//! Form validation run before any network call.
//!
//! Each form holds raw user input and validates into the request the matching
//! API port accepts. Failures are reported per field so a presentation layer
//! can place each message next to its input; only the first failing rule per
//! field is reported.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use rust_decimal::Decimal;
use zeroize::Zeroizing;

use super::account::{NewAccount, TransferRequest};
use super::auth::{LoginCredentials, Registration};
use super::bill_payment::{BillPaymentRequest, Frequency, RecurringPaymentRequest};
use super::ids::UserId;
use super::money::parse_amount;
use super::user::Role;

/// Minimum username length.
pub const USERNAME_MIN: usize = 3;
/// Maximum username length.
pub const USERNAME_MAX: usize = 20;
/// Minimum password length.
pub const PASSWORD_MIN: usize = 8;
/// Special characters a password must draw from.
pub const PASSWORD_SPECIALS: &str = "!@#$%^&*";
/// Minimum biller name length.
pub const BILLER_NAME_MIN: usize = 2;
/// Maximum biller name length.
pub const BILLER_NAME_MAX: usize = 100;

const REQUIRED: &str = "This field is required";

static USERNAME_RE: OnceLock<Regex> = OnceLock::new();
static BENEFICIARY_RE: OnceLock<Regex> = OnceLock::new();
static NEW_ACCOUNT_RE: OnceLock<Regex> = OnceLock::new();

fn compiled(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| {
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("validation regex {pattern} failed to compile: {error}"))
    })
}

fn username_regex() -> &'static Regex {
    // Length is enforced separately; this regex constrains allowed characters.
    compiled(&USERNAME_RE, "^[A-Za-z0-9_]+$")
}

fn beneficiary_regex() -> &'static Regex {
    compiled(&BENEFICIARY_RE, r"^\d{9,18}$")
}

fn new_account_regex() -> &'static Regex {
    compiled(&NEW_ACCOUNT_RE, r"^\d{12}$")
}

/// Per-field validation messages keyed by the form field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors(BTreeMap<&'static str, String>);

impl FormErrors {
    /// No errors.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `message` for `field` unless the field already failed.
    pub fn insert(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    /// Message recorded for `field`.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// Whether every field passed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of failing fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Failing fields and their messages, ordered by field name.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }

    fn check(&mut self, field: &'static str, outcome: Result<(), &'static str>) {
        if let Err(message) = outcome {
            self.insert(field, message);
        }
    }

    fn finish<T>(self, build: impl FnOnce() -> T) -> Result<T, Self> {
        if self.is_empty() {
            Ok(build())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for FormErrors {}

fn required(value: &str) -> Result<(), &'static str> {
    if value.trim().is_empty() {
        Err(REQUIRED)
    } else {
        Ok(())
    }
}

/// Check a username: 3 to 20 letters, digits, or underscores.
pub fn validate_username(value: &str) -> Result<(), &'static str> {
    let length = value.chars().count();
    if value.is_empty() {
        Err("Username is required")
    } else if length < USERNAME_MIN {
        Err("Username must be at least 3 characters")
    } else if length > USERNAME_MAX {
        Err("Username cannot exceed 20 characters")
    } else if !username_regex().is_match(value) {
        Err("Username can only contain letters, numbers, and underscores")
    } else {
        Ok(())
    }
}

/// Check password strength.
///
/// # Examples
/// ```
/// use banking_client::domain::validation::validate_password;
///
/// assert!(validate_password("Str0ng!pw").is_ok());
/// assert_eq!(
///     validate_password("weakpass"),
///     Err("Password must contain an uppercase letter")
/// );
/// ```
pub fn validate_password(value: &str) -> Result<(), &'static str> {
    if value.is_empty() {
        Err("Password is required")
    } else if value.chars().count() < PASSWORD_MIN {
        Err("Password must be at least 8 characters")
    } else if !value.chars().any(|c| c.is_ascii_uppercase()) {
        Err("Password must contain an uppercase letter")
    } else if !value.chars().any(|c| c.is_ascii_lowercase()) {
        Err("Password must contain a lowercase letter")
    } else if !value.chars().any(|c| c.is_ascii_digit()) {
        Err("Password must contain a number")
    } else if !value.chars().any(|c| PASSWORD_SPECIALS.contains(c)) {
        Err("Password must contain a special character (!@#$%^&*)")
    } else {
        Ok(())
    }
}

fn validate_biller_name(value: &str) -> Result<(), &'static str> {
    let length = value.trim().chars().count();
    if length < BILLER_NAME_MIN {
        Err("Please enter a valid biller name")
    } else if length > BILLER_NAME_MAX {
        Err("Biller name cannot exceed 100 characters")
    } else {
        Ok(())
    }
}

fn within_balance(amount: Decimal, available: Option<Decimal>) -> Result<(), &'static str> {
    match available {
        Some(balance) if amount > balance => Err("Insufficient balance"),
        _ => Ok(()),
    }
}

/// Raw login input.
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    /// Typed username.
    pub username: String,
    /// Typed password.
    pub password: Zeroizing<String>,
    /// Selected role.
    pub role: Option<Role>,
}

impl LoginForm {
    /// Validate into login credentials.
    pub fn validate(&self) -> Result<LoginCredentials, FormErrors> {
        let mut errors = FormErrors::new();
        errors.check("username", required(&self.username));
        errors.check("password", required(&self.password));
        let Some(role) = self.role else {
            errors.insert("role", REQUIRED);
            return Err(errors);
        };
        if !errors.is_empty() {
            return Err(errors);
        }
        LoginCredentials::try_from_parts(&self.username, &self.password, role).map_err(|err| {
            let mut errors = FormErrors::new();
            errors.insert("username", err.to_string());
            errors
        })
    }
}

/// Raw registration input.
#[derive(Debug, Clone, Default)]
pub struct RegisterForm {
    /// Requested username.
    pub username: String,
    /// Chosen password.
    pub password: Zeroizing<String>,
    /// Password typed a second time.
    pub confirm_password: Zeroizing<String>,
    /// Requested role.
    pub role: Option<Role>,
}

impl RegisterForm {
    /// Validate into a registration request.
    pub fn validate(&self) -> Result<Registration, FormErrors> {
        let mut errors = FormErrors::new();
        errors.check("username", validate_username(&self.username));
        errors.check("password", validate_password(&self.password));
        if self.password.as_str() != self.confirm_password.as_str() {
            errors.insert("confirmPassword", "Passwords do not match");
        }
        if self.role.is_none() {
            errors.insert("role", REQUIRED);
        }
        match self.role {
            Some(role) => errors.finish(|| Registration {
                username: self.username.clone(),
                password: self.password.clone(),
                role,
            }),
            None => Err(errors),
        }
    }
}

/// Raw transfer input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransferForm {
    /// Selected source account number.
    pub from_account_number: String,
    /// Typed beneficiary account number.
    pub to_account_number: String,
    /// Typed amount.
    pub amount: String,
}

impl TransferForm {
    /// Validate into a transfer request.
    ///
    /// `available` is the balance of the selected source account, when
    /// known; amounts above it are rejected.
    pub fn validate(&self, available: Option<Decimal>) -> Result<TransferRequest, FormErrors> {
        let mut errors = FormErrors::new();
        let from = self.from_account_number.trim();
        let to = self.to_account_number.trim();

        if from.is_empty() {
            errors.insert("fromAccountNumber", "Please select a source account");
        }
        if to.is_empty() {
            errors.insert("toAccountNumber", "Please enter beneficiary account number");
        } else if !beneficiary_regex().is_match(to) {
            errors.insert("toAccountNumber", "Account number must be 9-18 digits");
        } else if to == from {
            errors.insert("toAccountNumber", "Cannot transfer to the same account");
        }

        let amount = match parse_amount(&self.amount) {
            None => {
                errors.insert("amount", "Please enter a valid amount");
                Decimal::ZERO
            }
            Some(amount) if amount <= Decimal::ZERO => {
                errors.insert("amount", "Amount must be greater than 0");
                amount
            }
            Some(amount) => {
                errors.check("amount", within_balance(amount, available));
                amount
            }
        };

        errors.finish(|| TransferRequest {
            from_account_number: from.to_owned(),
            to_account_number: to.to_owned(),
            amount,
        })
    }
}

/// Raw one-off bill payment input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BillPaymentForm {
    /// Selected paying account number.
    pub account_number: String,
    /// Typed biller name.
    pub biller_name: String,
    /// Typed amount.
    pub amount: String,
}

impl BillPaymentForm {
    /// Validate into a bill payment request.
    ///
    /// `available` is the balance of the selected account, when known.
    pub fn validate(&self, available: Option<Decimal>) -> Result<BillPaymentRequest, FormErrors> {
        let mut errors = FormErrors::new();
        match self.collect(available, &mut errors) {
            Some(payment) => errors.finish(|| payment),
            None => Err(errors),
        }
    }

    fn collect(&self, available: Option<Decimal>, errors: &mut FormErrors) -> Option<BillPaymentRequest> {
        let account = self.account_number.trim();
        if account.is_empty() {
            errors.insert("accountNumber", "Please select an account");
        }
        errors.check("billerName", validate_biller_name(&self.biller_name));

        let amount = match parse_amount(&self.amount) {
            Some(amount) if amount > Decimal::ZERO => {
                errors.check("amount", within_balance(amount, available));
                Some(amount)
            }
            _ => {
                errors.insert("amount", "Please enter a valid amount");
                None
            }
        };

        amount.map(|amount| BillPaymentRequest {
            account_number: account.to_owned(),
            biller_name: self.biller_name.trim().to_owned(),
            amount,
        })
    }
}

/// Raw recurring bill payment input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecurringPaymentForm {
    /// The payment to repeat.
    pub payment: BillPaymentForm,
    /// Selected frequency.
    pub frequency: Option<Frequency>,
}

impl RecurringPaymentForm {
    /// Validate into a recurring payment request.
    pub fn validate(
        &self,
        available: Option<Decimal>,
    ) -> Result<RecurringPaymentRequest, FormErrors> {
        let mut errors = FormErrors::new();
        let payment = self.payment.collect(available, &mut errors);
        if self.frequency.is_none() {
            errors.insert("frequency", REQUIRED);
        }
        match (payment, self.frequency) {
            (Some(payment), Some(frequency)) => {
                errors.finish(|| RecurringPaymentRequest { payment, frequency })
            }
            _ => Err(errors),
        }
    }
}

/// Raw banker input for opening an account.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateAccountForm {
    /// Selected customer.
    pub user_id: Option<UserId>,
    /// Typed account number.
    pub account_number: String,
    /// Typed opening balance.
    pub balance: String,
}

impl CreateAccountForm {
    /// Validate into a new account request.
    pub fn validate(&self) -> Result<NewAccount, FormErrors> {
        let mut errors = FormErrors::new();
        if self.user_id.is_none() {
            errors.insert("userId", "Please select a customer");
        }

        let account = self.account_number.trim();
        if account.is_empty() {
            errors.insert("accountNumber", "Account number is required");
        } else if !new_account_regex().is_match(account) {
            errors.insert("accountNumber", "Account number must be 12 digits");
        }

        let balance = match parse_amount(&self.balance) {
            None => {
                errors.insert("balance", "Please enter initial balance");
                None
            }
            Some(balance) if balance < Decimal::ZERO => {
                errors.insert("balance", "Balance cannot be negative");
                None
            }
            Some(balance) => Some(balance),
        };

        match (self.user_id, balance) {
            (Some(user_id), Some(balance)) => errors.finish(|| NewAccount {
                user_id,
                account_number: account.to_owned(),
                balance,
            }),
            _ => Err(errors),
        }
    }
}
