//! Shared cap on simultaneously in-flight attempts.

use std::sync::Arc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

use crate::error::BudgetError;

/// Counting semaphore shared by every attempt of a run. Cloning shares the same pool.
#[derive(Debug, Clone)]
pub struct ConcurrencyBudget {
    sem: Arc<Semaphore>,
    capacity: usize,
}

/// One unit of the budget. Dropping it returns the unit, including on error or task abort.
#[derive(Debug)]
pub struct BudgetPermit {
    _permit: OwnedSemaphorePermit,
}

impl ConcurrencyBudget {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        ConcurrencyBudget { sem: Arc::new(Semaphore::new(capacity)), capacity }
    }

    /// Wait until a unit is free and take it.
    pub async fn acquire(&self) -> Result<BudgetPermit, BudgetError> {
        let permit = self.sem.clone().acquire_owned().await?;
        Ok(BudgetPermit { _permit: permit })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Units currently held.
    pub fn in_use(&self) -> usize {
        self.capacity - self.sem.available_permits()
    }
}
