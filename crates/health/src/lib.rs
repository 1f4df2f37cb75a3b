//! Health tracking: menstrual cycles, daily steps and meals.

mod cycle;
mod meal;
mod prediction;
mod sink;
mod step;

use std::ops::Deref;

pub use cycle::*;
pub use meal::*;
pub use prediction::*;
pub use sink::*;
pub use step::*;

#[derive(Clone)]
pub struct Command(pub oneday_shared::State);

impl Deref for Command {
    type Target = oneday_shared::State;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[derive(Clone)]
pub struct Query(pub sqlx::SqlitePool);
