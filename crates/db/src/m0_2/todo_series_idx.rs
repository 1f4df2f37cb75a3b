use sea_query::{Index, IndexCreateStatement, IndexDropStatement};

use crate::table::Todo;

fn up_statement() -> IndexCreateStatement {
    Index::create()
        .name("idx_todo_series")
        .table(Todo::Table)
        .col(Todo::SeriesId)
        .to_owned()
}

fn down_statement() -> IndexDropStatement {
    Index::drop().name("idx_todo_series").table(Todo::Table).to_owned()
}

sqlite_operation!(Operation);
