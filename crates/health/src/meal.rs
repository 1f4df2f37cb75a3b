use std::collections::HashMap;

use chrono::NaiveDate;
use oneday_db::table::{Meal, MealFood};
use sea_query::{Expr, ExprTrait, Order, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use strum::{AsRefStr, Display, EnumString, VariantArray};
use validator::Validate;

use crate::Command;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    EnumString,
    Display,
    AsRefStr,
    VariantArray,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct FoodInput {
    #[validate(length(min = 1, max = 100, message = "name must be 1 to 100 characters"))]
    pub name: String,
    #[serde(default)]
    #[validate(range(min = 0.0, message = "grams must not be negative"))]
    pub grams: f64,
    #[serde(default)]
    #[validate(range(min = 0.0, message = "calories must not be negative"))]
    pub calories: f64,
    #[serde(default)]
    #[validate(range(min = 0.0, message = "carbs must not be negative"))]
    pub carbs: f64,
    #[serde(default)]
    #[validate(range(min = 0.0, message = "protein must not be negative"))]
    pub protein: f64,
    #[serde(default)]
    #[validate(range(min = 0.0, message = "fat must not be negative"))]
    pub fat: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MealInput {
    pub meal_type: MealType,
    #[serde(default)]
    #[validate(nested)]
    pub foods: Vec<FoodInput>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReplaceMealsInput {
    #[validate(length(min = 1, message = "userId is required"))]
    pub user_id: String,
    pub date: NaiveDate,
    #[serde(default)]
    #[validate(nested)]
    pub meals: Vec<MealInput>,
}

/// Summed nutrition values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Macros {
    pub grams: f64,
    pub calories: f64,
    pub carbs: f64,
    pub protein: f64,
    pub fat: f64,
}

impl Macros {
    fn add(&mut self, food: &FoodView) {
        self.grams += food.grams;
        self.calories += food.calories;
        self.carbs += food.carbs;
        self.protein += food.protein;
        self.fat += food.fat;
    }

    fn merge(&mut self, other: &Macros) {
        self.grams += other.grams;
        self.calories += other.calories;
        self.carbs += other.carbs;
        self.protein += other.protein;
        self.fat += other.fat;
    }
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct FoodView {
    #[serde(skip)]
    pub meal_id: String,
    pub name: String,
    pub grams: f64,
    pub calories: f64,
    pub carbs: f64,
    pub protein: f64,
    pub fat: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MealView {
    pub id: String,
    pub meal_type: MealType,
    pub foods: Vec<FoodView>,
    pub totals: Macros,
}

#[derive(Debug, Clone, Serialize)]
pub struct DayMeals {
    pub date: NaiveDate,
    pub meals: Vec<MealView>,
    pub totals: Macros,
}

#[derive(FromRow)]
struct MealRow {
    id: String,
    meal_type: sqlx::types::Text<MealType>,
}

impl Command {
    /// Swaps every meal of the day for `input.meals` in one transaction.
    #[tracing::instrument(skip_all, fields(user_id = %input.user_id, date = %input.date))]
    pub async fn replace_meals(&self, input: ReplaceMealsInput) -> oneday_shared::Result<()> {
        input.validate()?;

        let date = input.date.to_string();
        let day_meals = Query::select()
            .column(Meal::Id)
            .from(Meal::Table)
            .and_where(Expr::col(Meal::UserId).eq(input.user_id.as_str()))
            .and_where(Expr::col(Meal::Date).eq(date.as_str()))
            .to_owned();

        let delete_foods = Query::delete()
            .from_table(MealFood::Table)
            .and_where(Expr::col(MealFood::MealId).in_subquery(day_meals))
            .to_owned();

        let delete_meals = Query::delete()
            .from_table(Meal::Table)
            .and_where(Expr::col(Meal::UserId).eq(input.user_id.as_str()))
            .and_where(Expr::col(Meal::Date).eq(date.as_str()))
            .to_owned();

        let mut meal_rows = Vec::new();
        let mut food_rows = Vec::new();

        for (position, meal) in input.meals.iter().enumerate() {
            let meal_id = ulid::Ulid::new().to_string();
            meal_rows.push(vec![
                meal_id.to_owned().into(),
                input.user_id.to_owned().into(),
                date.to_owned().into(),
                meal.meal_type.to_string().into(),
                (position as i64).into(),
            ]);

            for (position, food) in meal.foods.iter().enumerate() {
                food_rows.push(vec![
                    ulid::Ulid::new().to_string().into(),
                    meal_id.to_owned().into(),
                    food.name.to_owned().into(),
                    food.grams.into(),
                    food.calories.into(),
                    food.carbs.into(),
                    food.protein.into(),
                    food.fat.into(),
                    (position as i64).into(),
                ]);
            }
        }

        let insert_meals = Query::insert()
            .into_table(Meal::Table)
            .columns([
                Meal::Id,
                Meal::UserId,
                Meal::Date,
                Meal::MealType,
                Meal::Position,
            ])
            .to_owned();

        let insert_foods = Query::insert()
            .into_table(MealFood::Table)
            .columns([
                MealFood::Id,
                MealFood::MealId,
                MealFood::Name,
                MealFood::Grams,
                MealFood::Calories,
                MealFood::Carbs,
                MealFood::Protein,
                MealFood::Fat,
                MealFood::Position,
            ])
            .to_owned();

        oneday_db::transaction(&self.write_db, move |conn| {
            Box::pin(async move {
                let (sql, values) = delete_foods.build_sqlx(SqliteQueryBuilder);
                sqlx::query_with(&sql, values).execute(&mut *conn).await?;

                let (sql, values) = delete_meals.build_sqlx(SqliteQueryBuilder);
                sqlx::query_with(&sql, values).execute(&mut *conn).await?;

                oneday_db::insert_chunked(&mut *conn, &insert_meals, meal_rows).await?;
                oneday_db::insert_chunked(&mut *conn, &insert_foods, food_rows).await?;

                Ok::<_, oneday_shared::Error>(())
            })
        })
        .await?;

        tracing::info!(meals = input.meals.len(), "meals replaced");

        Ok(())
    }
}

impl crate::Query {
    /// Meals of a day with per-meal and daily totals.
    pub async fn meals(
        &self,
        user_id: impl Into<String>,
        date: NaiveDate,
    ) -> anyhow::Result<DayMeals> {
        let statement = Query::select()
            .columns([Meal::Id, Meal::MealType])
            .from(Meal::Table)
            .and_where(Expr::col(Meal::UserId).eq(user_id.into()))
            .and_where(Expr::col(Meal::Date).eq(date.to_string()))
            .order_by(Meal::Position, Order::Asc)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let meals = sqlx::query_as_with::<_, MealRow, _>(&sql, values)
            .fetch_all(&self.0)
            .await?;

        let mut foods_by_meal = HashMap::<String, Vec<FoodView>>::new();

        if !meals.is_empty() {
            let statement = Query::select()
                .columns([
                    MealFood::MealId,
                    MealFood::Name,
                    MealFood::Grams,
                    MealFood::Calories,
                    MealFood::Carbs,
                    MealFood::Protein,
                    MealFood::Fat,
                ])
                .from(MealFood::Table)
                .and_where(
                    Expr::col(MealFood::MealId).is_in(meals.iter().map(|m| m.id.to_owned())),
                )
                .order_by(MealFood::Position, Order::Asc)
                .to_owned();

            let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
            let foods = sqlx::query_as_with::<_, FoodView, _>(&sql, values)
                .fetch_all(&self.0)
                .await?;

            for food in foods {
                foods_by_meal
                    .entry(food.meal_id.to_owned())
                    .or_default()
                    .push(food);
            }
        }

        let mut totals = Macros::default();
        let meals = meals
            .into_iter()
            .map(|meal| {
                let foods = foods_by_meal.remove(&meal.id).unwrap_or_default();
                let mut meal_totals = Macros::default();
                for food in &foods {
                    meal_totals.add(food);
                }
                totals.merge(&meal_totals);

                MealView {
                    id: meal.id,
                    meal_type: meal.meal_type.0,
                    foods,
                    totals: meal_totals,
                }
            })
            .collect();

        Ok(DayMeals {
            date,
            meals,
            totals,
        })
    }
}
