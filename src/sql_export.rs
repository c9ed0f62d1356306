use crate::fd_ast::SuggestedTable;

/// One `CREATE TABLE` statement per table. Every column is `VARCHAR(255)`
/// and the first one carries `PRIMARY KEY`.
pub fn to_sql(tables: &[SuggestedTable]) -> String {
    tables.iter().map(create_table).collect::<Vec<_>>().join("\n")
}

fn create_table(table: &SuggestedTable) -> String {
    let columns = table
        .attributes
        .iter()
        .enumerate()
        .map(|(i, a)| {
            if i == 0 {
                format!("{a} VARCHAR(255) PRIMARY KEY")
            } else {
                format!("{a} VARCHAR(255)")
            }
        })
        .collect::<Vec<_>>()
        .join(", ");
    format!("CREATE TABLE {} ({columns});", table.name)
}
