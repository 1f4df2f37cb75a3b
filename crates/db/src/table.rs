use sea_query::Iden;

#[derive(Iden, Clone)]
pub enum User {
    Table,
    Id,
    Name,
    Email,
    CreatedAt,
}

#[derive(Iden, Clone)]
pub enum Schedule {
    Table,
    Id,
    UserId,
    SeriesId,
    Date,
    Title,
    Time,
    Category,
    Color,
    Reminder,
    Completed,
    CreatedAt,
}

#[derive(Iden, Clone)]
pub enum ScheduleTemplate {
    Table,
    Id,
    UserId,
    Title,
    Time,
    Category,
    Color,
    Reminder,
    CreatedAt,
}

#[derive(Iden, Clone)]
pub enum Todo {
    Table,
    Id,
    UserId,
    SeriesId,
    Date,
    Title,
    Category,
    Color,
    Completed,
    CreatedAt,
}

#[derive(Iden, Clone)]
pub enum Diary {
    Table,
    Id,
    UserId,
    Date,
    Title,
    Content,
    CanvasPath,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden, Clone)]
pub enum Meal {
    Table,
    Id,
    UserId,
    Date,
    MealType,
    Position,
}

#[derive(Iden, Clone)]
pub enum MealFood {
    Table,
    Id,
    MealId,
    Name,
    Grams,
    Calories,
    Carbs,
    Protein,
    Fat,
    Position,
}

#[derive(Iden, Clone)]
pub enum StopwatchRecord {
    Table,
    Id,
    UserId,
    Date,
    Task,
    Category,
    StartedAt,
    EndedAt,
    DurationSecs,
}

#[derive(Iden, Clone)]
pub enum MenstrualCycle {
    Table,
    Id,
    UserId,
    StartDate,
    EndDate,
    CreatedAt,
}

#[derive(Iden, Clone)]
pub enum DailyStep {
    Table,
    UserId,
    Date,
    Steps,
    UpdatedAt,
}
