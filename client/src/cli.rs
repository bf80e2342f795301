//! Command-line surface of the `banking-client` binary.
//!
//! [`Cli`] describes the arguments; [`App`] runs one [`Command`] against the
//! feature stores and writes a plain-text report. Role-restricted commands
//! are checked locally with the same rules the navigation table uses, so a
//! customer asking for banker data is refused before any request is sent.

use std::io::{self, Write};
use std::sync::Arc;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use zeroize::Zeroizing;

use crate::api::BankingApi;
use crate::client::AuthenticatedClient;
use crate::config::ClientSettings;
use crate::domain::format::{
    DateStyle, format_account_number, format_date, format_inr, mask_account_number,
    status_tone, transaction_direction,
};
use crate::domain::navigation::resolve;
use crate::domain::ports::{AccountsApi, AdminApi, ApiTransport, AuthApi, BankerApi, BillPaymentApi};
use crate::domain::validation::{
    BillPaymentForm, CreateAccountForm, LoginForm, RecurringPaymentForm, RegisterForm, TransferForm,
};
use crate::domain::{
    DomainError, FormErrors, Frequency, HIGH_VALUE_THRESHOLD, PaymentId, Role, RouteDecision,
    SessionHandle, Transaction, TransactionFilters, TransactionId, TransactionStatus,
    TransactionType, User, UserId, authorize, is_high_value,
};
use crate::stores::{
    AccountStore, AdminDashboard, AuthStore, BankerDashboard, BillPaymentStore, CustomerDashboard,
    CustomerStore, TransactionStore, UserStore,
};

/// `banking-client` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "banking-client",
    about = "Sign in to the online bank and work with accounts, payments, and approvals",
    version
)]
pub struct Cli {
    /// Backend base URL. Overrides `BANKING_API_URL`.
    #[arg(long, global = true, value_name = "url")]
    pub api_url: Option<String>,
    /// Request timeout in seconds. Overrides `BANKING_TIMEOUT_SECS`.
    #[arg(long, global = true, value_name = "secs")]
    pub timeout_secs: Option<u64>,
    /// Session file. Overrides `BANKING_SESSION_FILE`.
    #[arg(long, global = true, value_name = "path")]
    pub session_file: Option<String>,
    /// Operation to run.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Overlay the flags given on the command line onto `settings`.
    pub fn apply_to(&self, settings: &mut ClientSettings) {
        if let Some(api_url) = &self.api_url {
            settings.api_url = Some(api_url.clone());
        }
        if let Some(timeout_secs) = self.timeout_secs {
            settings.timeout_secs = timeout_secs;
        }
        if let Some(session_file) = &self.session_file {
            settings.session_file = Some(session_file.clone());
        }
    }
}

/// Operations offered by the client.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Sign in and remember the session.
    Login {
        /// Login name.
        #[arg(long)]
        username: String,
        /// Password.
        #[arg(long)]
        password: String,
        /// Role to sign in as.
        #[arg(long)]
        role: Role,
    },
    /// Create a new user.
    Register {
        /// Login name, 3 to 20 letters, digits, or underscores.
        #[arg(long)]
        username: String,
        /// Password.
        #[arg(long)]
        password: String,
        /// Password typed a second time.
        #[arg(long)]
        confirm_password: String,
        /// Requested role.
        #[arg(long)]
        role: Role,
    },
    /// Forget the session.
    Logout,
    /// Show the signed-in user.
    Whoami,
    /// Load the dashboard of the signed-in role.
    Dashboard,
    /// List the signed-in user's accounts.
    Accounts,
    /// Open an account for a customer.
    CreateAccount {
        /// Owning customer.
        #[arg(long)]
        user_id: UserId,
        /// Twelve-digit account number.
        #[arg(long)]
        account_number: String,
        /// Opening balance.
        #[arg(long, default_value = "0")]
        balance: String,
    },
    /// Move money between accounts.
    Transfer {
        /// Source account number.
        #[arg(long)]
        from: String,
        /// Destination account number.
        #[arg(long)]
        to: String,
        /// Amount in rupees.
        #[arg(long)]
        amount: String,
    },
    /// Show transaction history.
    Transactions {
        /// Only this type.
        #[arg(long = "type", value_name = "type")]
        kind: Option<TransactionType>,
        /// Only this status.
        #[arg(long)]
        status: Option<TransactionStatus>,
        /// Earliest date, `YYYY-MM-DD`; queries the backend.
        #[arg(long)]
        start_date: Option<NaiveDate>,
        /// Latest date, `YYYY-MM-DD`; queries the backend.
        #[arg(long)]
        end_date: Option<NaiveDate>,
        /// Only the most recent entries.
        #[arg(long)]
        recent: bool,
    },
    /// Pay a bill, once or on a schedule.
    PayBill {
        /// Paying account number.
        #[arg(long)]
        account: String,
        /// Biller name.
        #[arg(long)]
        biller: String,
        /// Amount in rupees.
        #[arg(long)]
        amount: String,
        /// Repeat the payment at this frequency.
        #[arg(long)]
        frequency: Option<Frequency>,
    },
    /// List scheduled payments.
    Scheduled,
    /// Cancel a scheduled payment.
    CancelPayment {
        /// Scheduled payment to cancel.
        id: PaymentId,
    },
    /// List customers (bankers).
    Customers,
    /// Enable a customer (bankers).
    Activate {
        /// Customer to enable.
        id: UserId,
    },
    /// Disable a customer (bankers).
    Deactivate {
        /// Customer to disable.
        id: UserId,
    },
    /// List transactions awaiting approval (bankers).
    Pending,
    /// Approve a pending transaction (bankers).
    Approve {
        /// Transaction to approve.
        id: TransactionId,
    },
    /// Reject a pending transaction (bankers).
    Reject {
        /// Transaction to reject.
        id: TransactionId,
    },
    /// List users (administrators).
    Users {
        /// Only users with this role.
        #[arg(long)]
        role: Option<Role>,
    },
    /// Delete a user (administrators).
    DeleteUser {
        /// User to delete.
        id: UserId,
    },
    /// Show where the client would navigate for a page path.
    Route {
        /// Page path such as `/banker/customers`.
        path: String,
    },
}

/// Errors reported by a command.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Input failed validation before any request was sent.
    #[error("invalid input: {0}")]
    Form(#[from] FormErrors),
    /// A store operation failed.
    #[error("{0}")]
    Store(#[from] DomainError),
    /// No session is held.
    #[error("not signed in; run `banking-client login` first")]
    SignedOut,
    /// The signed-in role may not run the command.
    #[error("{role} users cannot run this command")]
    Forbidden {
        /// Role of the signed-in user.
        role: Role,
    },
    /// The report could not be written.
    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
}

const CUSTOMER_COMMANDS: &[Role] = &[Role::Customer, Role::Banker];
const BANKER_COMMANDS: &[Role] = &[Role::Banker];
const STAFF_COMMANDS: &[Role] = &[Role::Banker, Role::Admin];
const ADMIN_COMMANDS: &[Role] = &[Role::Admin];

/// Wiring of the API and session used to run commands.
pub struct App<T> {
    api: Arc<BankingApi<T>>,
    session: SessionHandle,
}

impl<T: ApiTransport + 'static> App<T> {
    /// Commands sent over `transport`, signed with `session`.
    pub fn new(transport: Arc<T>, session: SessionHandle) -> Self {
        let client = AuthenticatedClient::new(transport, session.clone());
        Self {
            api: Arc::new(BankingApi::new(client)),
            session,
        }
    }

    /// Run `command`, writing its report to `out`.
    ///
    /// # Errors
    ///
    /// Returns validation, store, authorisation, and output failures.
    pub async fn run<W: Write>(&self, command: Command, out: &mut W) -> Result<(), CliError> {
        match command {
            Command::Login {
                username,
                password,
                role,
            } => self.login(username, password, role, out).await,
            Command::Register {
                username,
                password,
                confirm_password,
                role,
            } => {
                let registration = RegisterForm {
                    username,
                    password: Zeroizing::new(password),
                    confirm_password: Zeroizing::new(confirm_password),
                    role: Some(role),
                }
                .validate()?;
                self.auth_store().register(&registration).await?;
                writeln!(out, "Registration successful. Please sign in.")?;
                Ok(())
            }
            Command::Logout => {
                self.auth_store().logout();
                writeln!(out, "Signed out")?;
                Ok(())
            }
            Command::Whoami => {
                match self.session.user() {
                    Some(user) => writeln!(out, "{} ({}, id {})", user.username, user.role, user.id)?,
                    None => writeln!(out, "Not signed in")?,
                }
                Ok(())
            }
            Command::Dashboard => self.dashboard(out).await,
            Command::Accounts => {
                let user = self.require(CUSTOMER_COMMANDS)?;
                let mut store = AccountStore::new(self.accounts_api());
                store.fetch_accounts(user.id).await?;
                for account in store.accounts().items() {
                    writeln!(
                        out,
                        "{:>6}  {}  {}",
                        account.id,
                        format_account_number(&account.account_number),
                        format_inr(account.balance)
                    )?;
                }
                writeln!(out, "Total balance: {}", format_inr(store.total_balance()))?;
                Ok(())
            }
            Command::CreateAccount {
                user_id,
                account_number,
                balance,
            } => {
                self.require(STAFF_COMMANDS)?;
                let account = CreateAccountForm {
                    user_id: Some(user_id),
                    account_number,
                    balance,
                }
                .validate()?;
                let created = AccountStore::new(self.accounts_api())
                    .create_account(&account)
                    .await?;
                writeln!(
                    out,
                    "Opened account {} with {}",
                    format_account_number(&created.account_number),
                    format_inr(created.balance)
                )?;
                Ok(())
            }
            Command::Transfer { from, to, amount } => self.transfer(from, to, amount, out).await,
            Command::Transactions {
                kind,
                status,
                start_date,
                end_date,
                recent,
            } => {
                let filters = TransactionFilters {
                    kind,
                    status,
                    start_date,
                    end_date,
                };
                self.transactions(filters, recent, out).await
            }
            Command::PayBill {
                account,
                biller,
                amount,
                frequency,
            } => {
                let payment = BillPaymentForm {
                    account_number: account,
                    biller_name: biller,
                    amount,
                };
                self.pay_bill(payment, frequency, out).await
            }
            Command::Scheduled => {
                let user = self.require(CUSTOMER_COMMANDS)?;
                let mut store = BillPaymentStore::new(self.bill_payment_api());
                store.fetch_scheduled(user.id).await?;
                for payment in store.scheduled().items() {
                    let next = payment
                        .next_payment_date
                        .as_ref()
                        .map_or_else(|| "-".to_owned(), |date| format_date(date, DateStyle::Short));
                    writeln!(
                        out,
                        "{:>6}  {}  {}  {}  next {}  {}",
                        payment.id,
                        payment.biller_name,
                        format_inr(payment.amount),
                        payment.frequency,
                        next,
                        payment.status
                    )?;
                }
                writeln!(out, "{} active", store.active_scheduled().len())?;
                Ok(())
            }
            Command::CancelPayment { id } => {
                self.require(CUSTOMER_COMMANDS)?;
                BillPaymentStore::new(self.bill_payment_api())
                    .cancel_scheduled(id)
                    .await?;
                writeln!(out, "Cancelled scheduled payment {id}")?;
                Ok(())
            }
            Command::Customers => {
                self.require(BANKER_COMMANDS)?;
                let mut store = CustomerStore::new(self.banker_api());
                store.fetch_customers().await?;
                for customer in store.customers().items() {
                    let state = if customer.active { "active" } else { "inactive" };
                    writeln!(out, "{:>6}  {}  {state}", customer.id, customer.username)?;
                }
                writeln!(
                    out,
                    "{} active, {} inactive",
                    store.active().len(),
                    store.inactive().len()
                )?;
                Ok(())
            }
            Command::Activate { id } => {
                self.require(BANKER_COMMANDS)?;
                CustomerStore::new(self.banker_api()).activate(id).await?;
                writeln!(out, "Customer {id} activated")?;
                Ok(())
            }
            Command::Deactivate { id } => {
                self.require(BANKER_COMMANDS)?;
                CustomerStore::new(self.banker_api()).deactivate(id).await?;
                writeln!(out, "Customer {id} deactivated")?;
                Ok(())
            }
            Command::Pending => {
                self.require(BANKER_COMMANDS)?;
                let mut store = CustomerStore::new(self.banker_api());
                store.fetch_pending_transactions().await?;
                for transaction in store.pending_transactions().items() {
                    write_transaction(out, transaction, None)?;
                }
                writeln!(out, "{} awaiting approval", store.pending_count())?;
                Ok(())
            }
            Command::Approve { id } => {
                self.require(BANKER_COMMANDS)?;
                CustomerStore::new(self.banker_api()).approve(id).await?;
                writeln!(out, "Transaction {id} approved")?;
                Ok(())
            }
            Command::Reject { id } => {
                self.require(BANKER_COMMANDS)?;
                CustomerStore::new(self.banker_api()).reject(id).await?;
                writeln!(out, "Transaction {id} rejected")?;
                Ok(())
            }
            Command::Users { role } => {
                self.require(ADMIN_COMMANDS)?;
                let mut store = UserStore::new(self.admin_api());
                store.fetch_users().await?;
                let listed: Vec<&User> = match role {
                    Some(role) => store.by_role(role),
                    None => store.users().items().iter().collect(),
                };
                for user in listed {
                    writeln!(out, "{:>6}  {}  {}", user.id, user.username, user.role)?;
                }
                for (role, count) in store.count_by_role() {
                    writeln!(out, "{role}: {count}")?;
                }
                Ok(())
            }
            Command::DeleteUser { id } => {
                self.require(ADMIN_COMMANDS)?;
                UserStore::new(self.admin_api()).delete_user(id).await?;
                writeln!(out, "User {id} deleted")?;
                Ok(())
            }
            Command::Route { path } => {
                let role = self.session.user().map(|user| user.role);
                match resolve(&path, self.session.is_authenticated(), role) {
                    RouteDecision::Render => writeln!(out, "render {path}")?,
                    RouteDecision::RedirectToLogin => writeln!(out, "redirect /login")?,
                    RouteDecision::RedirectTo(target) => writeln!(out, "redirect {target}")?,
                }
                Ok(())
            }
        }
    }

    async fn login<W: Write>(
        &self,
        username: String,
        password: String,
        role: Role,
        out: &mut W,
    ) -> Result<(), CliError> {
        let credentials = LoginForm {
            username,
            password: Zeroizing::new(password),
            role: Some(role),
        }
        .validate()?;
        let landing = self.auth_store().login(&credentials).await?;
        let signed_in = self.session.user().map_or_else(
            || credentials.username().to_owned(),
            |user| format!("{} ({})", user.username, user.role),
        );
        writeln!(out, "Signed in as {signed_in}")?;
        writeln!(out, "Landing page: {landing}")?;
        Ok(())
    }

    async fn dashboard<W: Write>(&self, out: &mut W) -> Result<(), CliError> {
        let user = self.require(&[])?;
        let failures = match user.role {
            Role::Customer => {
                let mut dashboard =
                    CustomerDashboard::new(self.accounts_api(), self.bill_payment_api());
                let failures = dashboard.load(user.id).await;
                writeln!(
                    out,
                    "Accounts: {}  Total balance: {}",
                    dashboard.accounts.accounts().items().len(),
                    format_inr(dashboard.total_balance())
                )?;
                writeln!(out, "Recent transactions:")?;
                for transaction in dashboard.transactions.recent() {
                    write_transaction(out, transaction, Some(&user.username))?;
                }
                writeln!(
                    out,
                    "Active scheduled payments: {}",
                    dashboard.bill_payments.active_scheduled().len()
                )?;
                failures
            }
            Role::Banker => {
                let mut dashboard = BankerDashboard::new(self.banker_api());
                let failures = dashboard.load().await;
                let customers = &dashboard.customers;
                writeln!(
                    out,
                    "Customers: {} active, {} inactive",
                    customers.active().len(),
                    customers.inactive().len()
                )?;
                writeln!(out, "Pending approvals: {}", customers.pending_count())?;
                failures
            }
            Role::Admin => {
                let mut dashboard = AdminDashboard::new(self.admin_api());
                let failures = dashboard.load().await;
                for (role, count) in dashboard.users.count_by_role() {
                    writeln!(out, "{role}: {count}")?;
                }
                failures
            }
        };
        for failure in failures {
            writeln!(out, "warning: {failure}")?;
        }
        Ok(())
    }

    async fn transfer<W: Write>(
        &self,
        from: String,
        to: String,
        amount: String,
        out: &mut W,
    ) -> Result<(), CliError> {
        let user = self.require(CUSTOMER_COMMANDS)?;
        let mut store = AccountStore::new(self.accounts_api());
        store.fetch_accounts(user.id).await?;
        let available = store.account_by_number(&from).map(|account| account.balance);
        let request = TransferForm {
            from_account_number: from,
            to_account_number: to,
            amount,
        }
        .validate(available)?;
        let message = store.transfer(&request).await?;
        writeln!(out, "{message}")?;
        if is_high_value(request.amount) {
            writeln!(
                out,
                "Transfers above {} need banker approval before they complete.",
                format_inr(HIGH_VALUE_THRESHOLD)
            )?;
        }
        Ok(())
    }

    async fn transactions<W: Write>(
        &self,
        filters: TransactionFilters,
        recent: bool,
        out: &mut W,
    ) -> Result<(), CliError> {
        let user = self.require(CUSTOMER_COMMANDS)?;
        let mut store = TransactionStore::new(self.accounts_api());
        if filters.start_date.is_some() || filters.end_date.is_some() {
            store.fetch_with_filters(&filters).await?;
        } else {
            store.fetch_transactions(user.id).await?;
        }
        store.set_filters(filters);
        let listed = if recent {
            store.recent()
        } else {
            store.filtered()
        };
        for transaction in listed {
            write_transaction(out, transaction, Some(&user.username))?;
        }
        Ok(())
    }

    async fn pay_bill<W: Write>(
        &self,
        payment: BillPaymentForm,
        frequency: Option<Frequency>,
        out: &mut W,
    ) -> Result<(), CliError> {
        let user = self.require(CUSTOMER_COMMANDS)?;
        let mut accounts = AccountStore::new(self.accounts_api());
        accounts.fetch_accounts(user.id).await?;
        let available = accounts
            .account_by_number(&payment.account_number)
            .map(|account| account.balance);

        let mut store = BillPaymentStore::new(self.bill_payment_api());
        let message = match frequency {
            Some(frequency) => {
                let request = RecurringPaymentForm {
                    payment,
                    frequency: Some(frequency),
                }
                .validate(available)?;
                store.schedule_recurring(&request).await?
            }
            None => {
                let request = payment.validate(available)?;
                store.pay_bill(&request).await?
            }
        };
        writeln!(out, "{message}")?;
        Ok(())
    }

    fn require(&self, allowed: &[Role]) -> Result<User, CliError> {
        let user = self.session.user();
        let role = user.as_ref().map(|user| user.role);
        match (authorize(self.session.is_authenticated(), role, allowed), user) {
            (RouteDecision::Render, Some(user)) => Ok(user),
            (RouteDecision::RedirectTo(_), Some(user)) => Err(CliError::Forbidden { role: user.role }),
            _ => Err(CliError::SignedOut),
        }
    }

    fn auth_store(&self) -> AuthStore {
        let api: Arc<dyn AuthApi> = self.api.clone();
        AuthStore::new(api, self.session.clone())
    }

    fn accounts_api(&self) -> Arc<dyn AccountsApi> {
        self.api.clone()
    }

    fn bill_payment_api(&self) -> Arc<dyn BillPaymentApi> {
        self.api.clone()
    }

    fn banker_api(&self) -> Arc<dyn BankerApi> {
        self.api.clone()
    }

    fn admin_api(&self) -> Arc<dyn AdminApi> {
        self.api.clone()
    }
}

fn write_transaction<W: Write>(
    out: &mut W,
    transaction: &Transaction,
    viewer: Option<&str>,
) -> io::Result<()> {
    let date = transaction
        .timestamp
        .as_ref()
        .map_or_else(|| "-".to_owned(), |ts| format_date(ts, DateStyle::Short));
    let route = match (&transaction.from_account, &transaction.to_account) {
        (Some(from), Some(to)) => format!("{} -> {}", mask_account_number(from), mask_account_number(to)),
        (Some(from), None) => mask_account_number(from),
        (None, Some(to)) => mask_account_number(to),
        (None, None) => "-".to_owned(),
    };
    let direction = viewer.map_or_else(String::new, |username| {
        format!("  {}", transaction_direction(transaction, username))
    });
    writeln!(
        out,
        "{:>6}  {date}  {}  {route}  {}  {} [{}]{direction}",
        transaction.id,
        transaction.kind,
        format_inr(transaction.amount),
        transaction.status,
        status_tone(transaction.status.as_str())
    )
}
