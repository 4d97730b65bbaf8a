//! Common-column computation across tables

use rustc_hash::FxHashSet;

use crate::model::Table;

/// Labels present in every table, sorted lexicographically.
///
/// An empty slice yields no columns.
pub fn common_columns(tables: &[Table]) -> Vec<String> {
    let Some((first, rest)) = tables.split_first() else {
        return Vec::new();
    };

    let mut common: FxHashSet<&str> = first.labels().collect();
    for table in rest {
        let labels: FxHashSet<&str> = table.labels().collect();
        common.retain(|label| labels.contains(label));
        if common.is_empty() {
            break;
        }
    }

    let mut ordered: Vec<String> = common.into_iter().map(str::to_string).collect();
    ordered.sort();
    ordered
}

/// Distinct labels of `table` that are not in `common`, in table order
pub fn dropped_columns(table: &Table, common: &[String]) -> Vec<String> {
    table
        .label_set()
        .into_iter()
        .filter(|label| !common.iter().any(|c| c == label))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Column;

    fn table(labels: &[&str]) -> Table {
        Table::new(
            labels
                .iter()
                .enumerate()
                .map(|(i, l)| Column::new(*l, i))
                .collect(),
        )
    }

    #[test]
    fn test_common_columns_sorted() {
        let tables = [table(&["Name", "Age", "City"]), table(&["City", "Name", "Country"])];
        assert_eq!(common_columns(&tables), vec!["City", "Name"]);
    }

    #[test]
    fn test_common_columns_order_independent() {
        let a = [table(&["b", "a", "c"]), table(&["c", "a", "b"])];
        let b = [table(&["c", "a", "b"]), table(&["b", "a", "c"])];
        assert_eq!(common_columns(&a), vec!["a", "b", "c"]);
        assert_eq!(common_columns(&a), common_columns(&b));
    }

    #[test]
    fn test_common_columns_byte_order() {
        let tables = [table(&["b", "B", "a", "A"])];
        assert_eq!(common_columns(&tables), vec!["A", "B", "a", "b"]);
    }

    #[test]
    fn test_common_columns_empty() {
        assert!(common_columns(&[]).is_empty());
        assert!(common_columns(&[table(&["A", "B"]), table(&["C", "D"])]).is_empty());
    }

    #[test]
    fn test_common_columns_collapses_duplicates() {
        let tables = [table(&["Age", "Age", "Name"]), table(&["Age"])];
        assert_eq!(common_columns(&tables), vec!["Age"]);
    }

    #[test]
    fn test_dropped_columns() {
        let t = table(&["Name", "Age", "City", "Age"]);
        let common = vec!["City".to_string(), "Name".to_string()];
        assert_eq!(dropped_columns(&t, &common), vec!["Age"]);
    }
}
