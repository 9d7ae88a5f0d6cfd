use std::sync::Arc;

use tessera::catalog::catalog::Catalog;
use tessera::catalog::column::Column;
use tessera::catalog::schema::Schema;
use tessera::common::config::{INITIAL_TXN_ID, MAX_CID};
use tessera::common::logger::initialize_logger;
use tessera::concurrency::transaction::TransactionResult;
use tessera::concurrency::transaction_manager::TransactionManager;
use tessera::execution::expressions::arithmetic_expression::{
    ArithmeticExpression, ArithmeticType,
};
use tessera::execution::expressions::column_value_expression::ColumnRefExpression;
use tessera::execution::expressions::constant_value_expression::ConstantExpression;
use tessera::execution::expressions::project_info::ProjectInfo;
use tessera::execution::plan_executor::{ExecutionStatus, PlanExecutor};
use tessera::execution::plans::abstract_plan::PlanNode;
use tessera::execution::plans::seq_scan_plan::SeqScanPlanNode;
use tessera::execution::plans::update_plan::UpdatePlanNode;
use tessera::storage::data_table::DataTable;
use tessera::storage::storage_manager::StorageManager;
use tessera::storage::tuple::Tuple;
use tessera::types_db::type_id::TypeId;
use tessera::types_db::value::Value;

struct TestContext {
    storage: Arc<StorageManager>,
    catalog: Arc<Catalog>,
    txn_manager: Arc<TransactionManager>,
    plan_executor: PlanExecutor,
    table: Arc<DataTable>,
}

impl TestContext {
    /// Three committed accounts: (1, 100), (2, 200), (3, 300).
    fn with_accounts() -> Self {
        initialize_logger();
        let storage = Arc::new(StorageManager::new());
        let catalog = Arc::new(Catalog::new(Arc::clone(&storage)));
        let txn_manager = Arc::new(TransactionManager::new(Arc::clone(&storage)));
        let plan_executor = PlanExecutor::new(Arc::clone(&txn_manager), Arc::clone(&catalog));
        let table = catalog
            .create_table(
                "accounts",
                Schema::new(vec![
                    Column::new("id", TypeId::Integer),
                    Column::new("balance", TypeId::Integer),
                ]),
            )
            .unwrap();

        let txn = txn_manager.begin_transaction();
        for (id, balance) in [(1, 100), (2, 200), (3, 300)] {
            let location = table
                .insert_tuple(Tuple::new(vec![
                    Value::Integer(id),
                    Value::Integer(balance),
                ]))
                .unwrap();
            txn_manager.perform_insert(&txn, location);
        }
        txn_manager.commit_transaction(&txn);

        Self {
            storage,
            catalog,
            txn_manager,
            plan_executor,
            table,
        }
    }

    fn scan_plan(&self) -> PlanNode {
        SeqScanPlanNode::new(
            Arc::clone(self.table.get_schema()),
            self.table.get_table_oid(),
            self.table.get_name().to_string(),
            None,
        )
        .into()
    }

    /// UPDATE accounts SET balance = balance + delta.
    fn bump_balances_plan(&self, delta: i32) -> PlanNode {
        let bump = Arc::new(
            ArithmeticExpression::new(
                Arc::new(ColumnRefExpression::new(0, 1).into()),
                Arc::new(ConstantExpression::new(Value::Integer(delta)).into()),
                ArithmeticType::Add,
            )
            .into(),
        );
        let project_info =
            ProjectInfo::with_passthrough(vec![(1, bump)], self.table.get_schema());
        UpdatePlanNode::new(
            Arc::clone(self.table.get_schema()),
            self.table.get_table_oid(),
            Arc::new(project_info),
            self.scan_plan(),
        )
        .into()
    }

    /// Balances visible to a fresh transaction, ordered by id.
    fn visible_balances(&self) -> Vec<(Value, Value)> {
        let mut output = Vec::new();
        let status = self.plan_executor.execute_plan_with_output(
            Some(&self.scan_plan()),
            Vec::new(),
            None,
            &mut output,
        );
        assert_eq!(status.result, TransactionResult::Success);

        let mut rows = Vec::new();
        for tile in &output {
            for i in 0..tile.row_count() {
                rows.push((
                    tile.get_value(i, 0).unwrap(),
                    tile.get_value(i, 1).unwrap(),
                ));
            }
        }
        rows.sort();
        rows
    }

    fn version_chain_lengths(&self) -> Vec<usize> {
        let mut lengths = Vec::new();
        // The first tile group holds the three seeded versions.
        let tile_group = self.table.get_tile_groups()[0].clone();
        let header = tile_group.get_header();
        for offset in 0..3 {
            let mut length = 0;
            let mut cursor = header.get_next(offset);
            while let Some(next) = cursor {
                length += 1;
                cursor = self
                    .storage
                    .get_tile_group(next.get_block())
                    .and_then(|tg| tg.get_header().get_next(next.get_offset()));
            }
            lengths.push(length);
        }
        lengths
    }
}

#[test]
fn update_all_rows_commits_new_versions() {
    let ctx = TestContext::with_accounts();

    let status = ctx
        .plan_executor
        .execute_plan(Some(&ctx.bump_balances_plan(100)), Vec::new(), None);
    assert_eq!(status.result, TransactionResult::Success);
    assert_eq!(status.processed, 3);

    assert_eq!(
        ctx.visible_balances(),
        vec![
            (Value::Integer(1), Value::Integer(200)),
            (Value::Integer(2), Value::Integer(300)),
            (Value::Integer(3), Value::Integer(400)),
        ]
    );
    // Each updated row grew its chain by exactly one link.
    assert_eq!(ctx.version_chain_lengths(), vec![1, 1, 1]);
}

#[test]
fn conflicting_update_fails_fast_and_aborts() {
    let ctx = TestContext::with_accounts();

    // A concurrent transaction holds the second row.
    let holder = ctx.txn_manager.begin_transaction();
    let tile_group = ctx.table.get_tile_groups()[0].clone();
    let header = tile_group.get_header();
    assert!(ctx.txn_manager.acquire_ownership(&holder, header, 1));

    let status = ctx
        .plan_executor
        .execute_plan(Some(&ctx.bump_balances_plan(100)), Vec::new(), None);
    assert_eq!(status.result, TransactionResult::Failure);
    // The first row was processed before the conflict stopped everything.
    assert_eq!(status.processed, 1);

    // The abort restored the first row and released its ownership.
    assert_eq!(header.get_owner(0), INITIAL_TXN_ID);
    assert_eq!(header.get_next(0), None);
    assert_eq!(header.get_end_cid(0), MAX_CID);
    // The concurrent holder still owns its row.
    assert_eq!(header.get_owner(1), holder.get_transaction_id());

    ctx.txn_manager.abort_transaction(&holder);
    assert_eq!(
        ctx.visible_balances(),
        vec![
            (Value::Integer(1), Value::Integer(100)),
            (Value::Integer(2), Value::Integer(200)),
            (Value::Integer(3), Value::Integer(300)),
        ]
    );
}

#[test]
fn update_on_exhausted_table_fails_and_releases_ownership() {
    initialize_logger();
    let storage = Arc::new(StorageManager::new());
    let catalog = Arc::new(Catalog::new(Arc::clone(&storage)));
    let txn_manager = Arc::new(TransactionManager::new(Arc::clone(&storage)));
    let plan_executor = PlanExecutor::new(Arc::clone(&txn_manager), Arc::clone(&catalog));

    // A two-tuple budget, fully consumed by the seed rows, so the first
    // version insert fails with a null location.
    let table = catalog
        .create_table_with_budget(
            "ledger",
            Schema::new(vec![
                Column::new("id", TypeId::Integer),
                Column::new("balance", TypeId::Integer),
            ]),
            Some(2),
        )
        .unwrap();

    let txn = txn_manager.begin_transaction();
    for (id, balance) in [(1, 100), (2, 200)] {
        let location = table
            .insert_tuple(Tuple::new(vec![
                Value::Integer(id),
                Value::Integer(balance),
            ]))
            .unwrap();
        txn_manager.perform_insert(&txn, location);
    }
    txn_manager.commit_transaction(&txn);

    let bump = Arc::new(
        ArithmeticExpression::new(
            Arc::new(ColumnRefExpression::new(0, 1).into()),
            Arc::new(ConstantExpression::new(Value::Integer(50)).into()),
            ArithmeticType::Add,
        )
        .into(),
    );
    let project_info = ProjectInfo::with_passthrough(vec![(1, bump)], table.get_schema());
    let plan: PlanNode = UpdatePlanNode::new(
        Arc::clone(table.get_schema()),
        table.get_table_oid(),
        Arc::new(project_info),
        SeqScanPlanNode::new(
            Arc::clone(table.get_schema()),
            table.get_table_oid(),
            table.get_name().to_string(),
            None,
        )
        .into(),
    )
    .into();

    let status = plan_executor.execute_plan(Some(&plan), Vec::new(), None);
    assert_eq!(status.result, TransactionResult::Failure);
    // The failed version insert happened before the row counted.
    assert_eq!(status.processed, 0);

    // The abort released the ownership acquired for the failed row, and no
    // row is left owned or marked for expiration.
    let tile_group = table.get_tile_groups()[0].clone();
    let header = tile_group.get_header();
    for offset in 0..2 {
        assert_eq!(header.get_owner(offset), INITIAL_TXN_ID);
        assert_eq!(header.get_next(offset), None);
        assert_eq!(header.get_end_cid(offset), MAX_CID);
    }
}

#[test]
fn empty_select_auto_commits_successfully() {
    let ctx = TestContext::with_accounts();
    let empty = ctx
        .catalog
        .create_table(
            "empty_table",
            Schema::new(vec![Column::new("x", TypeId::Integer)]),
        )
        .unwrap();

    let plan: PlanNode = SeqScanPlanNode::new(
        Arc::clone(empty.get_schema()),
        empty.get_table_oid(),
        empty.get_name().to_string(),
        None,
    )
    .into();

    let mut output = Vec::new();
    let status =
        ctx.plan_executor
            .execute_plan_with_output(Some(&plan), Vec::new(), None, &mut output);
    assert_eq!(status.result, TransactionResult::Success);
    assert_eq!(status.processed, 0);
    assert!(output.is_empty());
}

#[test]
fn null_plan_is_a_no_op() {
    let ctx = TestContext::with_accounts();
    let status = ctx.plan_executor.execute_plan(None, Vec::new(), None);
    assert_eq!(status, ExecutionStatus::default());
}

#[test]
fn repeated_update_in_one_transaction_overwrites_in_place() {
    let ctx = TestContext::with_accounts();

    let txn = ctx.txn_manager.begin_transaction();
    for _ in 0..3 {
        let status = ctx.plan_executor.execute_plan(
            Some(&ctx.bump_balances_plan(10)),
            Vec::new(),
            Some(Arc::clone(&txn)),
        );
        assert_eq!(status.result, TransactionResult::Success);
        assert_eq!(status.processed, 3);
    }
    // Only the first statement created versions; the rest wrote in place.
    assert_eq!(ctx.version_chain_lengths(), vec![1, 1, 1]);

    assert_eq!(
        ctx.txn_manager.commit_transaction(&txn),
        TransactionResult::Success
    );
    assert_eq!(
        ctx.visible_balances(),
        vec![
            (Value::Integer(1), Value::Integer(130)),
            (Value::Integer(2), Value::Integer(230)),
            (Value::Integer(3), Value::Integer(330)),
        ]
    );
}

#[test]
fn explicit_transaction_failure_aborts_immediately() {
    let ctx = TestContext::with_accounts();

    let holder = ctx.txn_manager.begin_transaction();
    let tile_group = ctx.table.get_tile_groups()[0].clone();
    assert!(ctx
        .txn_manager
        .acquire_ownership(&holder, tile_group.get_header(), 0));

    let txn = ctx.txn_manager.begin_transaction();
    let status = ctx.plan_executor.execute_plan(
        Some(&ctx.bump_balances_plan(5)),
        Vec::new(),
        Some(Arc::clone(&txn)),
    );
    assert_eq!(status.result, TransactionResult::Failure);
    assert_eq!(txn.get_result(), TransactionResult::Failure);
    // The caller owns the transaction, so the caller aborts it.
    assert_eq!(
        ctx.txn_manager.abort_transaction(&txn),
        TransactionResult::Failure
    );

    ctx.txn_manager.abort_transaction(&holder);
    assert_eq!(
        ctx.visible_balances(),
        vec![
            (Value::Integer(1), Value::Integer(100)),
            (Value::Integer(2), Value::Integer(200)),
            (Value::Integer(3), Value::Integer(300)),
        ]
    );
}
