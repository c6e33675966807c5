//! End-to-end script synthesis tests
//!
//! Each test assembles a pre-classified schema graph the way the external
//! comparer would and checks the synthesized script.

mod common;

use common::*;
use pretty_assertions::assert_eq;
use rust_sqldiff::model::{ChangeStatus, CodeObject, CodeType, Database, Trigger};
use rust_sqldiff::{generate_script, MigrationScript, ScriptOptions};

fn synthesize(database: &Database) -> MigrationScript {
    generate_script(database, &ScriptOptions::default()).unwrap()
}

fn position(script: &str, needle: &str) -> usize {
    script
        .find(needle)
        .unwrap_or_else(|| panic!("script does not contain {:?}:\n{}", needle, script))
}

#[test]
fn test_no_op_graph_produces_empty_script() {
    let mut db = Database::new(1, "app");
    let mut users = table(10, "Users");
    users.columns.push(int_column(11, "Id"));
    users.columns.push(nvarchar_column(12, "Name", 50));
    users.indexes.push(nonclustered_index(13, "IX_Users_Name", "Name"));
    db.insert_table(users);
    let mut orders = table(20, "Orders");
    orders.columns.push(int_column(21, "Id"));
    db.insert_table(orders);

    let script = synthesize(&db);
    assert_eq!(script.sql, "");
    assert!(script.warnings.is_empty());
}

#[test]
fn test_created_table_is_a_single_create_fragment() {
    let mut db = Database::new(1, "app");
    let mut t1 = table(10, "T1");
    t1.status = ChangeStatus::Create;
    let mut id = int_column(11, "Id");
    id.status = ChangeStatus::Create;
    t1.columns.push(id);
    let mut name = nvarchar_column(12, "Name", 50);
    name.status = ChangeStatus::Create;
    t1.columns.push(name);
    db.insert_table(t1);

    let script = synthesize(&db);
    assert_eq!(
        script.sql,
        "CREATE TABLE [dbo].[T1]\n(\n\t[Id] [int] NOT NULL,\n\t[Name] [nvarchar] (50) NULL\n)\nGO\n"
    );
}

#[test]
fn test_foreign_keys_added_after_all_table_creates() {
    let mut db = Database::new(1, "app");
    let mut a = table(10, "A");
    a.status = ChangeStatus::Create;
    a.columns.push(int_column(11, "Id"));
    a.columns.push(int_column(12, "BId"));
    let mut fk = foreign_key(13, "FK_A_B", "BId", "[dbo].[B]", 20);
    fk.status = ChangeStatus::Create;
    a.constraints.push(fk);
    db.insert_table(a);
    let mut b = table(20, "B");
    b.status = ChangeStatus::Create;
    b.columns.push(int_column(21, "Id"));
    db.insert_table(b);

    let sql = synthesize(&db).sql;
    let create_a = position(&sql, "CREATE TABLE [dbo].[A]");
    let create_b = position(&sql, "CREATE TABLE [dbo].[B]");
    let add_fk = position(&sql, "ADD CONSTRAINT [FK_A_B] FOREIGN KEY");
    assert!(create_a < add_fk && create_b < add_fk);
    // the create itself must not carry the foreign key inline
    assert_eq!(sql.matches("FOREIGN KEY").count(), 1);
}

#[test]
fn test_dropped_table_gets_foreign_key_pre_drop() {
    let mut db = Database::new(1, "app");
    let mut t2 = table(10, "T2");
    t2.status = ChangeStatus::Drop;
    t2.columns.push(int_column(11, "Id"));
    db.insert_table(t2);
    let mut t3 = table(20, "T3");
    t3.columns.push(int_column(21, "Id"));
    t3.columns.push(int_column(22, "T2Id"));
    t3.constraints
        .push(foreign_key(23, "FK_T3_T2", "T2Id", "[dbo].[T2]", 10));
    db.insert_table(t3);
    db.dependencies
        .add(constraint_dependency(10, "FK_T3_T2", "[dbo].[T3]"));

    let sql = synthesize(&db).sql;
    assert_eq!(
        sql,
        "ALTER TABLE [dbo].[T3] DROP CONSTRAINT [FK_T3_T2]\nGO\nDROP TABLE [dbo].[T2]\nGO\n"
    );
}

#[test]
fn test_self_referencing_foreign_key_is_left_alone() {
    let mut db = Database::new(1, "app");
    let mut t = table(10, "Tree");
    t.status = ChangeStatus::Drop;
    t.columns.push(int_column(11, "Id"));
    t.columns.push(int_column(12, "ParentId"));
    t.constraints
        .push(foreign_key(13, "FK_Tree_Tree", "ParentId", "[dbo].[Tree]", 10));
    db.insert_table(t);
    db.dependencies
        .add(constraint_dependency(10, "FK_Tree_Tree", "[dbo].[Tree]"));

    let sql = synthesize(&db).sql;
    assert_eq!(sql, "DROP TABLE [dbo].[Tree]\nGO\n");
}

#[test]
fn test_fk_pre_drop_respects_dependency_counts() {
    let mut db = Database::new(1, "app");
    let mut t = table(10, "T");
    t.status = ChangeStatus::Drop;
    t.columns.push(int_column(11, "Id"));
    db.insert_table(t);
    let mut r = table(20, "R");
    r.columns.push(int_column(21, "Id"));
    r.columns.push(int_column(22, "TId"));
    r.constraints
        .push(foreign_key(23, "FK_R_T", "TId", "[dbo].[T]", 10));
    db.insert_table(r);
    // T is referenced once; R is referenced twice, so R handles its own order
    db.dependencies.add(constraint_dependency(10, "FK_R_T", "[dbo].[R]"));
    db.dependencies.add(constraint_dependency(20, "FK_X_R", "[dbo].[X]"));
    db.dependencies.add(constraint_dependency(20, "FK_Y_R", "[dbo].[Y]"));

    let sql = synthesize(&db).sql;
    assert!(!sql.contains("DROP CONSTRAINT"));
    assert!(sql.contains("DROP TABLE [dbo].[T]"));
}

#[test]
fn test_drop_policy_suppresses_table_drops() {
    let mut db = Database::new(1, "app");
    let mut t2 = table(10, "T2");
    t2.status = ChangeStatus::Drop;
    t2.columns.push(int_column(11, "Id"));
    db.insert_table(t2);

    let script = generate_script(
        &db,
        &ScriptOptions {
            ignore_table_drops: true,
        },
    )
    .unwrap();
    assert_eq!(script.sql, "");
}

#[test]
fn test_clustered_index_loss_escalates_to_rebuild() {
    let mut db = Database::new(1, "app");
    let mut x = table(10, "X");
    x.status = ChangeStatus::Alter;
    x.has_clustered_index = true;
    let mut id = int_column(11, "Id");
    id.is_identity = true;
    x.columns.push(id);
    x.columns.push(nvarchar_column(12, "Name", 50));
    let mut ix = clustered_index(13, "IX_X", "Id");
    ix.status = ChangeStatus::Drop;
    x.indexes.push(ix);
    x.original = Some(Box::new(table(10, "X")));
    db.insert_table(x);

    let sql = synthesize(&db).sql;
    let drop_index = position(&sql, "DROP INDEX [IX_X] ON [dbo].[X]");
    let temp_create = position(&sql, "CREATE TABLE [dbo].[TempX]");
    let identity_on = position(&sql, "SET IDENTITY_INSERT [dbo].[TempX] ON");
    let copy = position(&sql, "INSERT INTO [dbo].[TempX]");
    let identity_off = position(&sql, "SET IDENTITY_INSERT [dbo].[TempX] OFF");
    let drop_table = position(&sql, "DROP TABLE [dbo].[X]");
    let rename = position(&sql, "EXEC sp_rename N'[dbo].[TempX]', N'X', 'OBJECT'");
    assert!(drop_index < temp_create);
    assert!(temp_create < identity_on);
    assert!(identity_on < copy);
    assert!(copy < identity_off);
    assert!(identity_off < drop_table);
    assert!(drop_table < rename);
}

#[test]
fn test_no_identity_bracketing_without_identity_column() {
    let mut db = Database::new(1, "app");
    let mut x = table(10, "X");
    x.status = ChangeStatus::AlterRebuild;
    x.columns.push(int_column(11, "Id"));
    x.original = Some(Box::new(table(10, "X")));
    db.insert_table(x);

    let sql = synthesize(&db).sql;
    assert!(sql.contains("INSERT INTO [dbo].[TempX]"));
    assert!(!sql.contains("IDENTITY_INSERT"));
}

#[test]
fn test_rebuild_without_original_degrades_to_warning() {
    let mut db = Database::new(1, "app");
    let mut x = table(10, "X");
    x.status = ChangeStatus::AlterRebuild;
    x.columns.push(int_column(11, "Id"));
    db.insert_table(x);

    let script = synthesize(&db);
    assert!(!script.sql.contains("CREATE TABLE [dbo].[TempX]"));
    assert_eq!(script.warnings.len(), 1);
    assert!(script.warnings[0].contains("rebuild of [dbo].[X] skipped"));
}

#[test]
fn test_empty_rebuild_plan_emits_nothing() {
    let mut db = Database::new(1, "app");
    let mut x = table(10, "X");
    x.status = ChangeStatus::AlterRebuild;
    let mut only = int_column(11, "Old");
    only.status = ChangeStatus::Drop;
    x.columns.push(only);
    x.original = Some(Box::new(table(10, "X")));
    db.insert_table(x);

    let script = synthesize(&db);
    assert_eq!(script.sql, "");
    assert!(script.warnings.is_empty());
}

#[test]
fn test_dependency_rebuild_is_narrowed_to_altered_columns() {
    let mut db = Database::new(1, "app");
    let mut d = table(20, "D");
    d.status = ChangeStatus::AlterRebuildDependencies;
    let mut c1 = int_column(21, "C1");
    c1.status = ChangeStatus::Alter;
    d.columns.push(c1);
    d.columns.push(int_column(22, "C2"));
    d.indexes.push(nonclustered_index(23, "IX1", "C1"));
    d.indexes.push(nonclustered_index(24, "IX2", "C2"));
    db.insert_table(d);
    db.dependencies.add(index_dependency(20, "IX1", Some(21)));
    db.dependencies.add(index_dependency(20, "IX2", Some(22)));

    let sql = synthesize(&db).sql;
    let drop_ix1 = position(&sql, "DROP INDEX [IX1] ON [dbo].[D]");
    let alter_column = position(&sql, "ALTER TABLE [dbo].[D] ALTER COLUMN [C1] [int] NOT NULL");
    let recreate_ix1 = position(&sql, "CREATE NONCLUSTERED INDEX [IX1] ON [dbo].[D]");
    assert!(drop_ix1 < alter_column && alter_column < recreate_ix1);
    assert!(!sql.contains("[IX2]"));
}

#[test]
fn test_dependency_rebuild_widens_when_columns_match_nothing() {
    let mut db = Database::new(1, "app");
    let mut d = table(20, "D");
    d.status = ChangeStatus::AlterRebuildDependencies;
    let mut c1 = int_column(21, "C1");
    c1.status = ChangeStatus::Alter;
    d.columns.push(c1);
    d.indexes.push(nonclustered_index(23, "IX1", "C1"));
    d.indexes.push(nonclustered_index(24, "IX2", "C1"));
    db.insert_table(d);
    // unscoped records only: the column-scoped search finds nothing
    db.dependencies.add(index_dependency(20, "IX1", None));
    db.dependencies.add(index_dependency(20, "IX2", None));

    let sql = synthesize(&db).sql;
    assert!(sql.contains("DROP INDEX [IX1]"));
    assert!(sql.contains("DROP INDEX [IX2]"));
    assert!(sql.contains("CREATE NONCLUSTERED INDEX [IX1]"));
    assert!(sql.contains("CREATE NONCLUSTERED INDEX [IX2]"));
}

#[test]
fn test_rebuild_recreates_dependents_in_reverse_order() {
    let mut db = Database::new(1, "app");
    let mut r = table(30, "R");
    r.status = ChangeStatus::AlterRebuild;
    r.columns.push(int_column(31, "A"));
    r.original = Some(Box::new(table(30, "R")));
    db.insert_table(r);
    db.insert_view(CodeObject::new(
        40,
        "dbo",
        "V1",
        CodeType::View,
        "CREATE VIEW [dbo].[V1] AS SELECT [A] FROM [dbo].[R]",
    ));
    db.insert_view(CodeObject::new(
        41,
        "dbo",
        "V2",
        CodeType::View,
        "CREATE VIEW [dbo].[V2] AS SELECT [A] FROM [dbo].[V1]",
    ));
    db.dependencies.add(view_dependency(30, "[dbo].[V1]"));
    db.dependencies.add(view_dependency(30, "[dbo].[V2]"));

    let sql = synthesize(&db).sql;
    let drop_v1 = position(&sql, "DROP VIEW [dbo].[V1]");
    let drop_v2 = position(&sql, "DROP VIEW [dbo].[V2]");
    let rebuild = position(&sql, "CREATE TABLE [dbo].[TempR]");
    let create_v2 = position(&sql, "CREATE VIEW [dbo].[V2]");
    let create_v1 = position(&sql, "CREATE VIEW [dbo].[V1]");
    assert!(drop_v1 < drop_v2);
    assert!(drop_v2 < rebuild);
    // collected order reversed on the way back
    assert!(rebuild < create_v2);
    assert!(create_v2 < create_v1);
}

#[test]
fn test_rebuild_skips_recreating_dependents_of_dropped_parents() {
    let mut db = Database::new(1, "app");
    let mut r = table(30, "R");
    r.status = ChangeStatus::AlterRebuild;
    r.columns.push(int_column(31, "A"));
    r.original = Some(Box::new(table(30, "R")));
    db.insert_table(r);
    let mut p = table(50, "P");
    p.status = ChangeStatus::Drop;
    p.columns.push(int_column(51, "Id"));
    p.constraints
        .push(foreign_key(52, "FK_P_R", "Id", "[dbo].[R]", 30));
    db.insert_table(p);
    db.dependencies.add(constraint_dependency(30, "FK_P_R", "[dbo].[P]"));

    let sql = synthesize(&db).sql;
    assert!(sql.contains("DROP CONSTRAINT [FK_P_R]"));
    assert!(!sql.contains("ADD CONSTRAINT [FK_P_R]"));
}

#[test]
fn test_disabled_trigger_toggles() {
    let mut db = Database::new(1, "app");
    let mut t = table(10, "T");
    t.status = ChangeStatus::Alter;
    t.columns.push(int_column(11, "Id"));
    let mut tr = Trigger::new(
        12,
        "dbo",
        "TR_T",
        "CREATE TRIGGER [dbo].[TR_T] ON [dbo].[T] AFTER INSERT AS RETURN",
    );
    tr.status = ChangeStatus::Disabled;
    tr.is_disabled = true;
    t.triggers.push(tr);
    db.insert_table(t);
    let mut ddl = Trigger::new(
        13,
        "dbo",
        "TR_NoDrops",
        "CREATE TRIGGER [dbo].[TR_NoDrops] ON DATABASE FOR DROP_TABLE AS RETURN",
    );
    ddl.is_ddl_trigger = true;
    ddl.status = ChangeStatus::Disabled;
    db.insert_ddl_trigger(ddl);

    let sql = synthesize(&db).sql;
    let disable = position(&sql, "ALTER TABLE [dbo].[T] DISABLE TRIGGER [TR_T]");
    let enable = position(&sql, "ENABLE TRIGGER [TR_NoDrops]");
    assert!(disable < enable);
    assert!(!sql.contains("ALTER TABLE [dbo].[T] ENABLE"));
}

#[test]
fn test_altered_view_redefines_after_drops() {
    let mut db = Database::new(1, "app");
    let mut view = CodeObject::new(
        40,
        "dbo",
        "V",
        CodeType::View,
        "CREATE VIEW [dbo].[V] AS SELECT 1 AS N",
    );
    view.status = ChangeStatus::Alter;
    db.insert_view(view);
    let mut function = CodeObject::new(
        41,
        "dbo",
        "F",
        CodeType::Function,
        "CREATE FUNCTION [dbo].[F]() RETURNS INT AS BEGIN RETURN 1 END",
    );
    function.status = ChangeStatus::Create;
    db.insert_function(function);

    let sql = synthesize(&db).sql;
    let drop_view = position(&sql, "DROP VIEW [dbo].[V]");
    let create_view = position(&sql, "CREATE VIEW [dbo].[V]");
    let create_function = position(&sql, "CREATE FUNCTION [dbo].[F]");
    assert!(drop_view < create_view);
    assert!(create_view < create_function);
}

#[test]
fn test_synthesis_is_deterministic() {
    let mut db = Database::new(1, "app");
    for n in 0..6 {
        let id = 100 + n * 10;
        let mut t = table(id, &format!("T{}", n));
        t.status = match n % 3 {
            0 => ChangeStatus::Create,
            1 => ChangeStatus::Drop,
            _ => ChangeStatus::Alter,
        };
        let mut c = int_column(id + 1, "Id");
        if t.status == ChangeStatus::Alter {
            c.status = ChangeStatus::Alter;
        }
        t.columns.push(c);
        db.insert_table(t);
    }

    let first = synthesize(&db).sql;
    let second = synthesize(&db).sql;
    assert_eq!(first, second);
    assert!(!first.is_empty());
}
