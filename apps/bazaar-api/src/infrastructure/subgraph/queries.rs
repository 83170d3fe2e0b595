//! GraphQL query documents for the game-items subgraph.
//!
//! Filter values always travel as GraphQL variables; only the shape
//! of the `where` clause and the sort direction are baked into the
//! document, because graph-node rejects `null` filter values.

use crate::application::ports::TransferQuery;

/// Collection key for transfer queries.
pub const TRANSFERS_ROOT: &str = "transfers";

/// Collection key for listing queries.
pub const LISTINGS_ROOT: &str = "listings";

/// Collection key for the item index.
pub const ITEMS_ROOT: &str = "items";

/// Collection key for balance lookups.
pub const BALANCES_ROOT: &str = "userBalances";

/// Paginated item index.
pub const ITEMS_QUERY: &str = "\
query Items($first: Int!, $skip: Int!) {
  items(first: $first, skip: $skip, orderBy: id) {
    id
  }
}";

/// Active listings for one item, paginated.
pub const LISTINGS_QUERY: &str = "\
query Listings($item: String!, $first: Int!, $skip: Int!) {
  listings(where: { item: $item, active: true }, first: $first, skip: $skip) {
    id
    item { id }
    unitPriceEth
    remainingQuantity
    owner
  }
}";

/// One user's balance in one item.
pub const BALANCE_QUERY: &str = "\
query Balance($user: String!, $item: String!) {
  userBalances(where: { user: $user, item: $item }, first: 1) {
    quantity
  }
}";

/// Build the transfer query document for the given filters.
#[must_use]
pub fn transfers_query(query: &TransferQuery) -> String {
    let mut declarations = vec!["$first: Int!", "$skip: Int!"];
    let mut conditions = Vec::new();

    if query.item_id.is_some() {
        declarations.push("$item: String!");
        conditions.push("item: $item");
    }
    if query.since.is_some() {
        declarations.push("$since: Int!");
        conditions.push("timestamp_gte: $since");
    }
    if query.until.is_some() {
        declarations.push("$until: Int!");
        conditions.push("timestamp_lt: $until");
    }

    let direction = if query.newest_first { "desc" } else { "asc" };
    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("where: {{ {} }}, ", conditions.join(", "))
    };

    format!(
        "query Transfers({declarations}) {{\n  \
         transfers({where_clause}orderBy: timestamp, orderDirection: {direction}, \
         first: $first, skip: $skip) {{\n    \
         id\n    item {{ id }}\n    txHash\n    timestamp\n    unitPriceEth\n    \
         quantity\n    totalValueEth\n    recipient\n  }}\n}}",
        declarations = declarations.join(", "),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transfers_query_declares_only_used_variables() {
        let document = transfers_query(&TransferQuery::history("sword"));

        assert!(document.contains("$item: String!"));
        assert!(!document.contains("$since"));
        assert!(!document.contains("$until"));
        assert!(document.contains("orderDirection: asc"));
    }

    #[test]
    fn transfers_query_window_filters_both_bounds() {
        let document = transfers_query(&TransferQuery::window("sword", 100, 200));

        assert!(document.contains("timestamp_gte: $since"));
        assert!(document.contains("timestamp_lt: $until"));
    }

    #[test]
    fn transfers_query_most_recent_is_descending() {
        let document = transfers_query(&TransferQuery::most_recent("sword", 90));
        assert!(document.contains("orderDirection: desc"));
    }

    #[test]
    fn transfers_query_without_filters_has_no_where_clause() {
        let document = transfers_query(&TransferQuery::default());
        assert!(!document.contains("where:"));
    }
}
