use sea_query::{Index, IndexCreateStatement, IndexDropStatement};

use crate::table::User;

fn up_statement() -> IndexCreateStatement {
    Index::create()
        .name("idx_user_email")
        .table(User::Table)
        .unique()
        .col(User::Email)
        .to_owned()
}

fn down_statement() -> IndexDropStatement {
    Index::drop().name("idx_user_email").table(User::Table).to_owned()
}

sqlite_operation!(Operation);
