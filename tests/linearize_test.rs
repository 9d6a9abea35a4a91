//! Tests for C3 linearization and the linearization table

use rstest::rstest;

use lineage::domain::{DomainError, HierarchyBuilder, LinearizationTable, MroResolver, TypeGraph};

/// B1(A1, B), A1(A), B(A)
fn diamond() -> TypeGraph {
    let mut builder = HierarchyBuilder::new();
    builder.declare("A", Vec::<String>::new());
    builder.declare("A1", ["A"]);
    builder.declare("B", ["A"]);
    builder.declare("B1", ["A1", "B"]);
    builder.build().expect("diamond is valid")
}

fn mro(graph: &TypeGraph, name: &str) -> Result<Vec<String>, DomainError> {
    let mut resolver = MroResolver::new(graph);
    let lin = resolver.linearize_name(name)?;
    Ok(graph.names(lin.as_slice()))
}

#[test]
fn given_diamond_when_linearizing_bottom_then_follows_c3_order() {
    // Arrange
    let graph = diamond();

    // Act
    let order = mro(&graph, "B1").unwrap();

    // Assert
    assert_eq!(order, vec!["B1", "A1", "B", "A"]);
}

#[test]
fn given_three_level_multiple_inheritance_when_linearizing_then_preserves_local_order() {
    // Arrange: Z(K1, K2, K3), K1(A, B, C), K2(D, B, E), K3(D, A), A..E(O)
    let mut builder = HierarchyBuilder::new();
    builder.declare("O", Vec::<String>::new());
    for base in ["A", "B", "C", "D", "E"] {
        builder.declare(base, ["O"]);
    }
    builder.declare("K1", ["A", "B", "C"]);
    builder.declare("K2", ["D", "B", "E"]);
    builder.declare("K3", ["D", "A"]);
    builder.declare("Z", ["K1", "K2", "K3"]);
    let graph = builder.build().unwrap();

    // Act
    let order = mro(&graph, "Z").unwrap();

    // Assert
    assert_eq!(
        order,
        vec!["Z", "K1", "K2", "K3", "D", "A", "B", "C", "E", "O"]
    );
    assert_eq!(mro(&graph, "K1").unwrap(), vec!["K1", "A", "B", "C", "O"]);
    assert_eq!(mro(&graph, "K2").unwrap(), vec!["K2", "D", "B", "E", "O"]);
    assert_eq!(mro(&graph, "K3").unwrap(), vec!["K3", "D", "A", "O"]);
}

#[rstest]
#[case("A", &["A"])]
#[case("A1", &["A1", "A"])]
#[case("B", &["B", "A"])]
#[case("B1", &["B1", "A1", "B", "A"])]
fn given_diamond_when_linearizing_each_type_then_head_is_type_itself(
    #[case] name: &str,
    #[case] expected: &[&str],
) {
    let graph = diamond();

    let order = mro(&graph, name).unwrap();

    assert_eq!(order, expected);
    assert_eq!(order[0], name);
}

#[test]
fn given_resolver_when_linearizing_twice_then_returns_same_shared_result() {
    // Arrange
    let graph = diamond();
    let mut resolver = MroResolver::new(&graph);

    // Act
    let first = resolver.linearize_name("B1").unwrap();
    let second = resolver.linearize_name("B1").unwrap();

    // Assert
    assert_eq!(first, second);
    assert_eq!(first.head(), graph.lookup("B1"));
}

#[test]
fn given_conflicting_parent_orders_when_linearizing_then_names_offending_type() {
    // Arrange: X(A, B) and Y(B, A) disagree on the order of A and B
    let mut builder = HierarchyBuilder::new();
    builder.declare("A", Vec::<String>::new());
    builder.declare("B", Vec::<String>::new());
    builder.declare("X", ["A", "B"]);
    builder.declare("Y", ["B", "A"]);
    builder.declare("Z", ["X", "Y"]);
    let graph = builder.build().expect("acyclic graph builds");

    // Act
    let result = mro(&graph, "Z");

    // Assert
    match result {
        Err(DomainError::InconsistentHierarchy { type_name, .. }) => assert_eq!(type_name, "Z"),
        other => panic!("expected InconsistentHierarchy, got {other:?}"),
    }
    // The consistent parts of the graph still linearize
    assert_eq!(mro(&graph, "X").unwrap(), vec!["X", "A", "B"]);
}

#[test]
fn given_parent_listed_before_its_own_base_when_linearizing_then_fails() {
    // class C(A, B) where B derives from A: A cannot precede B
    let mut builder = HierarchyBuilder::new();
    builder.declare("A", Vec::<String>::new());
    builder.declare("B", ["A"]);
    builder.declare("C", ["A", "B"]);
    let graph = builder.build().unwrap();

    let result = mro(&graph, "C");

    assert!(matches!(
        result,
        Err(DomainError::InconsistentHierarchy { ref type_name, .. }) if type_name == "C"
    ));
}

#[test]
fn given_single_inheritance_chain_when_linearizing_then_walks_up_to_root() {
    let mut builder = HierarchyBuilder::new();
    builder.declare("Company", Vec::<String>::new());
    builder.declare("Employee", ["Company"]);
    builder.declare("Manager", ["Employee"]);
    let graph = builder.build().unwrap();

    assert_eq!(
        mro(&graph, "Manager").unwrap(),
        vec!["Manager", "Employee", "Company"]
    );
}

#[test]
fn given_unknown_type_when_linearizing_by_name_then_unknown_type_error() {
    let graph = diamond();

    let result = mro(&graph, "Nope");

    assert_eq!(result, Err(DomainError::UnknownType("Nope".to_string())));
}

#[test]
fn given_diamond_when_checking_subclass_then_uses_linearization() {
    let graph = diamond();
    let mut resolver = MroResolver::new(&graph);
    let b1 = graph.lookup("B1").unwrap();
    let a = graph.lookup("A").unwrap();
    let a1 = graph.lookup("A1").unwrap();
    let b = graph.lookup("B").unwrap();

    assert!(resolver.is_subclass(b1, a).unwrap());
    assert!(resolver.is_subclass(b1, b1).unwrap());
    assert!(!resolver.is_subclass(a, b1).unwrap());
    assert!(!resolver.is_subclass(a1, b).unwrap());
    assert!(resolver.is_subclass_of_any(a1, &[b, a]).unwrap());
    assert!(!resolver.is_subclass_of_any(a, &[a1, b]).unwrap());
}

#[test]
fn given_valid_graph_when_building_table_then_has_entry_per_type_in_declaration_order() {
    // Arrange
    let graph = diamond();

    // Act
    let table = LinearizationTable::build(&graph).unwrap();

    // Assert
    assert_eq!(table.len(), 4);
    let rows: Vec<(String, Vec<String>)> = table
        .iter()
        .map(|(ty, lin)| (graph.name(ty).to_string(), graph.names(lin.as_slice())))
        .collect();
    assert_eq!(rows[0], ("A".to_string(), vec!["A".to_string()]));
    assert_eq!(rows[3].0, "B1");
    assert_eq!(rows[3].1, vec!["B1", "A1", "B", "A"]);
    let b1 = graph.lookup("B1").unwrap();
    assert_eq!(table.get(b1).map(|l| l.len()), Some(4));
}

#[test]
fn given_inconsistent_graph_when_building_table_then_fails() {
    let mut builder = HierarchyBuilder::new();
    builder.declare("A", Vec::<String>::new());
    builder.declare("B", ["A"]);
    builder.declare("C", ["A", "B"]);
    let graph = builder.build().unwrap();

    let result = LinearizationTable::build(&graph);

    assert!(matches!(
        result,
        Err(DomainError::InconsistentHierarchy { .. })
    ));
}
