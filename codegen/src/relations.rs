//! Relationship inference from foreign keys
//!
//! Optional pass over the full table set. Every foreign key — inline or
//! merged from an ALTER block — yields two symmetric records: a
//! many-referencing-one record on the child table and a
//! one-referencing-many record on the parent. No de-duplication or cycle
//! detection: cyclic schemas and several keys into one table are legal and
//! produce independent pairs.

use tablesmith_types::model::Table;

use crate::naming::relation_attr_name;

/// Direction of a relationship record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationKind {
    /// Child side: single reference to the parent
    ManyToOne,
    /// Parent side: collection of children
    OneToMany,
}

/// One side of an inferred relationship pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    pub kind: RelationKind,
    /// Table the declaration renders on
    pub table: String,
    /// Related table
    pub target_table: String,
    /// Foreign-key column on the child table
    pub fk_column: String,
    /// Referenced column on the parent table
    pub target_column: String,
}

impl Relationship {
    /// Attribute name of this declaration
    #[must_use]
    pub fn attr_name(&self) -> String {
        match self.kind {
            RelationKind::ManyToOne => relation_attr_name(&self.fk_column, &self.target_table),
            RelationKind::OneToMany => self.target_table.replace('-', "_"),
        }
    }

    /// Back-reference name on the other side of the pair
    #[must_use]
    pub fn back_populates(&self) -> String {
        match self.kind {
            RelationKind::ManyToOne => self.table.replace('-', "_"),
            RelationKind::OneToMany => relation_attr_name(&self.fk_column, &self.table),
        }
    }
}

/// Collect both sides of every foreign-key relationship, in table order
#[must_use]
pub fn collect_relationships(tables: &[Table]) -> Vec<Relationship> {
    let mut relationships = Vec::new();
    for table in tables {
        for column in &table.columns {
            let Some(reference) = &column.reference else {
                continue;
            };
            relationships.push(Relationship {
                kind: RelationKind::ManyToOne,
                table: table.name.clone(),
                target_table: reference.table.clone(),
                fk_column: column.name.clone(),
                target_column: reference.column.clone(),
            });
            relationships.push(Relationship {
                kind: RelationKind::OneToMany,
                table: reference.table.clone(),
                target_table: table.name.clone(),
                fk_column: column.name.clone(),
                target_column: reference.column.clone(),
            });
        }
    }
    relationships
}

/// The records that render on one table
#[must_use]
pub fn for_table<'a>(relationships: &'a [Relationship], table: &str) -> Vec<&'a Relationship> {
    relationships.iter().filter(|r| r.table == table).collect()
}
