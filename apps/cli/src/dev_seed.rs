use formwork_core::AppResult;
use formwork_domain::AccountStatus;
use formwork_infrastructure::InMemoryAccountDirectory;
use tracing::info;

pub const DEV_SEED_ADMIN_NAME: &str = "admin";
const DEV_SEED_ADMIN_EMAIL: &str = "admin@formwork.local";
pub const DEV_SEED_ADMIN_PASSWORD: &str = "admin";

const DEV_SEED_PENDING_NAME: &str = "pending";
const DEV_SEED_PENDING_EMAIL: &str = "pending@formwork.local";
const DEV_SEED_PENDING_PASSWORD: &str = "pending";

pub async fn run(accounts: &InMemoryAccountDirectory) -> AppResult<()> {
    let admin = accounts
        .seed_account(
            DEV_SEED_ADMIN_NAME,
            DEV_SEED_ADMIN_EMAIL,
            DEV_SEED_ADMIN_PASSWORD,
            AccountStatus::Active,
        )
        .await?;
    let pending = accounts
        .seed_account(
            DEV_SEED_PENDING_NAME,
            DEV_SEED_PENDING_EMAIL,
            DEV_SEED_PENDING_PASSWORD,
            AccountStatus::Blocked,
        )
        .await?;

    info!(admin = %admin.uid, pending = %pending.uid, "seeded development accounts");
    Ok(())
}
