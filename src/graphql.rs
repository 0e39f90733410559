// src/graphql.rs
//
// Fixed GraphQL documents. Queries that return column values splice in the
// shared fragment so every read surfaces the same side fields the decoder
// relies on.

macro_rules! with_column_values_fragment {
    ($document:literal) => {
        concat!(
            r#"fragment ColumnValuesFragment on ColumnValue {
    id
    type
    value
    text
    ... on ButtonValue {
        label
    }
    ... on MirrorValue {
        display_value
    }
    ... on WorldClockValue {
        timezone
    }
    ... on StatusValue {
        label
    }
    ... on FormulaValue {
        display_value
        column {
            settings_str
        }
    }
    ... on VoteValue {
        vote_count
    }
    ... on TagsValue {
        tags {
            name
        }
    }
    ... on BoardRelationValue {
        linked_item_ids
    }
    ... on DependencyValue {
        linked_item_ids
    }
    ... on WeekValue {
        start_date
        end_date
    }
}
"#,
            $document
        )
    };
}

pub const GET_ITEM: &str = with_column_values_fragment!(
    r#"query getItem($itemId: ID!, $columnIds: [String!]) {
    items(ids: [$itemId]) {
        id
        name
        board { id }
        column_values(ids: $columnIds) {
            ...ColumnValuesFragment
        }
    }
}"#
);

pub const GET_ITEM_BOARD: &str = r#"query getItemBoard($itemId: ID!) {
    items(ids: [$itemId]) {
        id
        name
        board { id }
    }
}"#;

pub const LIST_BOARD_ITEMS: &str = with_column_values_fragment!(
    r#"query listBoardItems($boardId: ID!, $columnIds: [String!]) {
    boards(ids: [$boardId]) {
        items_page(limit: 500) {
            cursor
            items {
                id
                name
                board { id }
                column_values(ids: $columnIds) {
                    ...ColumnValuesFragment
                }
            }
        }
    }
}"#
);

pub const LIST_NEXT_ITEMS: &str = with_column_values_fragment!(
    r#"query listNextItems($cursor: String!, $columnIds: [String!]) {
    next_items_page(cursor: $cursor, limit: 500) {
        cursor
        items {
            id
            name
            board { id }
            column_values(ids: $columnIds) {
                ...ColumnValuesFragment
            }
        }
    }
}"#
);

pub const LIST_ITEMS_BY_COLUMN_VALUES: &str = with_column_values_fragment!(
    r#"query listItemsByColumnValues($limit: Int, $boardId: ID!, $columns: [ItemsPageByColumnValuesQuery!], $columnIds: [String!]) {
    items_page_by_column_values(limit: $limit, board_id: $boardId, columns: $columns) {
        items {
            id
            name
            board { id }
            column_values(ids: $columnIds) {
                ...ColumnValuesFragment
            }
        }
    }
}"#
);

pub const LIST_SUBITEMS: &str = with_column_values_fragment!(
    r#"query listSubitems($itemId: ID!, $columnIds: [String!]) {
    items(ids: [$itemId]) {
        subitems {
            id
            name
            board { id }
            column_values(ids: $columnIds) {
                ...ColumnValuesFragment
            }
        }
    }
}"#
);

pub const LIST_BOARDS: &str = r#"query listBoards {
    boards(order_by: created_at) {
        id
        name
        description
        state
        items_count
    }
}"#;

pub const LIST_BOARD_COLUMNS: &str = r#"query listBoardColumns($boardId: ID!) {
    boards(ids: [$boardId]) {
        columns {
            id
            title
            type
            settings_str
            description
        }
    }
}"#;

pub const LIST_BOARD_GROUPS: &str = r#"query listBoardGroups($boardId: ID!) {
    boards(ids: [$boardId]) {
        groups {
            id
            title
        }
    }
}"#;

pub const LIST_WORKSPACES: &str = r#"query listWorkspaces($limit: Int) {
    workspaces(limit: $limit) {
        id
        name
    }
}"#;

pub const LIST_WORKSPACE_BOARDS: &str = r#"query listWorkspaceBoards($workspaceId: ID!) {
    boards(workspace_ids: [$workspaceId], order_by: created_at) {
        id
        name
        description
        state
        items_count
    }
}"#;

pub const LIST_USERS: &str = r#"query listUsers {
    users(newest_first: true) {
        id
        name
        email
        created_at
    }
}"#;

pub const GET_USER_BY_ID: &str = r#"query getUserById($userId: ID!) {
    users(ids: [$userId]) {
        id
        name
        email
        created_at
    }
}"#;

pub const GET_USER_BY_EMAIL: &str = r#"query getUserByEmail($email: String!) {
    users(emails: [$email]) {
        id
        name
        email
        created_at
    }
}"#;

pub const CREATE_ITEM: &str = r#"mutation createItem($itemName: String!, $boardId: ID!, $groupId: String, $columnValues: JSON, $createLabels: Boolean) {
    create_item(item_name: $itemName, board_id: $boardId, group_id: $groupId, column_values: $columnValues, create_labels_if_missing: $createLabels) {
        id
    }
}"#;

pub const CREATE_SUBITEM: &str = r#"mutation createSubitem($parentItemId: ID!, $itemName: String!, $columnValues: JSON, $createLabels: Boolean) {
    create_subitem(parent_item_id: $parentItemId, item_name: $itemName, column_values: $columnValues, create_labels_if_missing: $createLabels) {
        id
        board { id }
    }
}"#;

pub const UPDATE_ITEM: &str = r#"mutation updateItem($itemId: ID!, $boardId: ID!, $columnValues: JSON!, $createLabels: Boolean) {
    change_multiple_column_values(item_id: $itemId, board_id: $boardId, column_values: $columnValues, create_labels_if_missing: $createLabels) {
        id
        name
    }
}"#;

pub const DELETE_ITEM: &str = r#"mutation deleteItem($itemId: ID!) {
    delete_item(item_id: $itemId) {
        id
    }
}"#;

pub const CREATE_UPDATE: &str = r#"mutation createUpdate($itemId: ID!, $updateBody: String!) {
    create_update(item_id: $itemId, body: $updateBody) {
        id
    }
}"#;

pub const CREATE_GROUP: &str = r#"mutation createGroup($boardId: ID!, $groupName: String!) {
    create_group(board_id: $boardId, group_name: $groupName) {
        id
    }
}"#;

pub const CREATE_COLUMN: &str = r#"mutation createColumn($boardId: ID!, $columnTitle: String!, $columnType: ColumnType!) {
    create_column(board_id: $boardId, title: $columnTitle, column_type: $columnType) {
        id
    }
}"#;
