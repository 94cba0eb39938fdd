//! Pot service domain logic: savings goals with deposits and withdrawals.
//!
//! Pot names are unique. A withdrawal larger than the pot's total fails and
//! leaves the pot untouched.

use tracing::{info, warn};

use crate::backend::domain::classifier::classify_pot_progress;
use crate::backend::domain::commands::pots::{
    CreatePotCommand, PotListResult, PotView, UpdatePotCommand,
};
use crate::backend::domain::errors::{DomainError, DomainResult};
use crate::backend::domain::models::generate_id;
use crate::backend::domain::models::pot::Pot;
use crate::backend::storage::{DbConnection, PotRepository};

#[derive(Clone)]
pub struct PotService {
    db: DbConnection,
}

impl PotService {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    pub async fn create_pot(&self, command: CreatePotCommand) -> DomainResult<PotView> {
        info!("Creating pot: {:?}", command);

        let pot = Pot {
            id: generate_id(),
            name: command.name.trim().to_string(),
            target: command.target,
            total: command.total.unwrap_or(0.0),
            theme: command.theme.trim().to_string(),
        };
        pot.validate()?;

        let mut tx = self.db.begin().await?;
        if PotRepository::find_by_name(&mut tx, &pot.name).await?.is_some() {
            warn!("Pot name '{}' already in use", pot.name);
            return Err(DomainError::Conflict(format!("A pot named '{}' already exists", pot.name)));
        }
        PotRepository::insert(&mut tx, &pot).await?;
        tx.commit().await?;

        Ok(view(pot))
    }

    pub async fn get_pot(&self, id: &str) -> DomainResult<PotView> {
        let mut conn = self.db.pool().acquire().await?;
        PotRepository::get(&mut conn, id)
            .await?
            .map(view)
            .ok_or_else(|| DomainError::not_found("Pot", id))
    }

    /// Every pot with its progress, plus the sum of all pot totals
    pub async fn list_pots(&self) -> DomainResult<PotListResult> {
        let mut conn = self.db.pool().acquire().await?;
        let pots = PotRepository::list(&mut conn).await?;

        let total_saved = pots.iter().map(|p| p.total).sum();
        Ok(PotListResult {
            pots: pots.into_iter().map(view).collect(),
            total_saved,
        })
    }

    pub async fn update_pot(&self, id: &str, command: UpdatePotCommand) -> DomainResult<PotView> {
        info!("Updating pot {}: {:?}", id, command);

        let mut tx = self.db.begin().await?;

        let mut pot = PotRepository::get(&mut tx, id)
            .await?
            .ok_or_else(|| DomainError::not_found("Pot", id))?;

        if let Some(name) = command.name {
            let name = name.trim().to_string();
            if name != pot.name {
                if PotRepository::find_by_name(&mut tx, &name).await?.is_some() {
                    return Err(DomainError::Conflict(format!("A pot named '{}' already exists", name)));
                }
                pot.name = name;
            }
        }
        if let Some(target) = command.target {
            pot.target = target;
        }
        if let Some(theme) = command.theme {
            pot.theme = theme.trim().to_string();
        }
        pot.validate()?;

        PotRepository::update(&mut tx, &pot).await?;
        tx.commit().await?;

        Ok(view(pot))
    }

    pub async fn delete_pot(&self, id: &str) -> DomainResult<()> {
        info!("Deleting pot {}", id);

        let mut conn = self.db.pool().acquire().await?;
        if !PotRepository::delete(&mut conn, id).await? {
            warn!("Pot {} not found for deletion", id);
            return Err(DomainError::not_found("Pot", id));
        }
        Ok(())
    }

    pub async fn deposit(&self, id: &str, amount: f64) -> DomainResult<PotView> {
        info!("Depositing {:.2} into pot {}", amount, id);

        let mut tx = self.db.begin().await?;
        let mut pot = PotRepository::get(&mut tx, id)
            .await?
            .ok_or_else(|| DomainError::not_found("Pot", id))?;

        pot.deposit(amount)?;
        PotRepository::update(&mut tx, &pot).await?;
        tx.commit().await?;

        Ok(view(pot))
    }

    pub async fn withdraw(&self, id: &str, amount: f64) -> DomainResult<PotView> {
        info!("Withdrawing {:.2} from pot {}", amount, id);

        let mut tx = self.db.begin().await?;
        let mut pot = PotRepository::get(&mut tx, id)
            .await?
            .ok_or_else(|| DomainError::not_found("Pot", id))?;

        if let Err(e) = pot.withdraw(amount) {
            warn!("Withdrawal from pot {} rejected: {}", id, e);
            return Err(e);
        }
        PotRepository::update(&mut tx, &pot).await?;
        tx.commit().await?;

        Ok(view(pot))
    }
}

fn view(pot: Pot) -> PotView {
    let percentage = classify_pot_progress(&pot);
    PotView { pot, percentage }
}
