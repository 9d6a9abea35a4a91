//! Tests for HierarchyBuilder validation

use lineage::domain::{DomainError, HierarchyBuilder, TypeDecl};

#[test]
fn given_forward_references_when_building_then_resolves_parents() {
    // Arrange: child declared before its parents
    let mut builder = HierarchyBuilder::new();
    builder.declare("Car", ["Vehicle"]);
    builder.declare("Vehicle", Vec::<String>::new());

    // Act
    let graph = builder.build().unwrap();

    // Assert
    let car = graph.lookup("Car").unwrap();
    let vehicle = graph.lookup("Vehicle").unwrap();
    assert_eq!(graph.node(car).parents, vec![vehicle]);
    assert_eq!(graph.roots(), vec![vehicle]);
    assert_eq!(graph.children(vehicle), vec![car]);
}

#[test]
fn given_two_types_naming_each_other_when_building_then_cycle_detected() {
    // Arrange
    let mut builder = HierarchyBuilder::new();
    builder.declare("X", ["Y"]);
    builder.declare("Y", ["X"]);

    // Act
    let result = builder.build();

    // Assert
    assert_eq!(
        result.unwrap_err(),
        DomainError::CycleDetected {
            path: vec!["X".to_string(), "Y".to_string(), "X".to_string()]
        }
    );
}

#[test]
fn given_type_naming_itself_when_building_then_cycle_detected() {
    let mut builder = HierarchyBuilder::new();
    builder.declare("Selfish", ["Selfish"]);

    let err = builder.build().unwrap_err();

    assert!(matches!(err, DomainError::CycleDetected { .. }));
    assert_eq!(
        err.to_string(),
        "cycle detected in hierarchy: Selfish -> Selfish"
    );
}

#[test]
fn given_long_cycle_below_valid_root_when_building_then_reports_only_cycle() {
    let mut builder = HierarchyBuilder::new();
    builder.declare("Root", Vec::<String>::new());
    builder.declare("A", ["Root", "C"]);
    builder.declare("B", ["A"]);
    builder.declare("C", ["B"]);

    let err = builder.build().unwrap_err();

    assert_eq!(
        err,
        DomainError::CycleDetected {
            path: vec![
                "A".to_string(),
                "C".to_string(),
                "B".to_string(),
                "A".to_string()
            ]
        }
    );
}

#[test]
fn given_unknown_parent_when_building_then_names_child_and_parent() {
    let mut builder = HierarchyBuilder::new();
    builder.declare("Car", ["Vehicle"]);

    let err = builder.build().unwrap_err();

    assert_eq!(
        err,
        DomainError::UnknownParent {
            child: "Car".to_string(),
            parent: "Vehicle".to_string()
        }
    );
}

#[test]
fn given_duplicate_type_when_building_then_duplicate_name() {
    let mut builder = HierarchyBuilder::new();
    builder.declare("A", Vec::<String>::new());
    builder.declare("A", Vec::<String>::new());

    assert_eq!(
        builder.build().unwrap_err(),
        DomainError::DuplicateName("A".to_string())
    );
}

#[test]
fn given_parent_listed_twice_when_building_then_duplicate_parent() {
    let mut builder = HierarchyBuilder::new();
    builder.declare("A", Vec::<String>::new());
    builder.declare("B", ["A", "A"]);

    assert!(matches!(
        builder.build(),
        Err(DomainError::DuplicateParent { ref child, ref parent }) if child == "B" && parent == "A"
    ));
}

#[test]
fn given_invalid_identifier_when_building_then_invalid_name() {
    let mut builder = HierarchyBuilder::new();
    builder.push(TypeDecl {
        name: "not a name".to_string(),
        ..TypeDecl::default()
    });

    assert_eq!(
        builder.build().unwrap_err(),
        DomainError::InvalidName("not a name".to_string())
    );
}

#[test]
fn given_members_when_building_then_private_members_are_members_too() {
    let mut builder = HierarchyBuilder::new();
    builder
        .declare("Account", Vec::<String>::new())
        .member("deposit")
        .private_member("__balance");

    let graph = builder.build().unwrap();

    let node = graph.node(graph.lookup("Account").unwrap());
    assert!(node.members.contains("deposit"));
    assert!(node.members.contains("__balance"));
    assert!(node.private.contains("__balance"));
    assert!(!node.private.contains("deposit"));
}
