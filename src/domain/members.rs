//! Member lookup along the linearization: attribute access, `super`, cooperative calls.

use tracing::debug;

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::hierarchy::{TypeGraph, TypeId};
use crate::domain::linearize::MroResolver;

/// Where a lookup originates from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Access {
    /// From outside the type: private members are refused
    #[default]
    External,
    /// From a method of the type itself
    Internal,
}

fn first_declaring(
    graph: &TypeGraph,
    candidates: &[TypeId],
    member: &str,
    access: Access,
) -> Option<DomainResult<TypeId>> {
    let owner = candidates
        .iter()
        .copied()
        .find(|&ty| graph.node(ty).members.contains(member))?;

    let node = graph.node(owner);
    if access == Access::External && node.private.contains(member) {
        return Some(Err(DomainError::PrivateMember {
            owner: node.name.clone(),
            member: member.to_string(),
        }));
    }
    Some(Ok(owner))
}

impl MroResolver<'_> {
    /// The type that provides `member` for instances of `ty`.
    pub fn resolve_member(&mut self, ty: TypeId, member: &str, access: Access) -> DomainResult<TypeId> {
        let graph = self.graph();
        let mro = self.linearize(ty)?;
        let owner = first_declaring(graph, mro.as_slice(), member, access).unwrap_or_else(|| {
            Err(DomainError::MemberNotFound {
                type_name: graph.name(ty).to_string(),
                member: member.to_string(),
            })
        })?;
        debug!("{}.{} -> {}", graph.name(ty), member, graph.name(owner));
        Ok(owner)
    }

    /// `super(after, instance_of_ty).member`: search the MRO of `ty` past `after`.
    pub fn super_lookup(
        &mut self,
        ty: TypeId,
        after: TypeId,
        member: &str,
    ) -> DomainResult<TypeId> {
        let graph = self.graph();
        let mro = self.linearize(ty)?;
        let rest = mro.after(after).ok_or_else(|| DomainError::NotAnAncestor {
            type_name: graph.name(ty).to_string(),
            ancestor: graph.name(after).to_string(),
        })?;
        first_declaring(graph, rest, member, Access::Internal).unwrap_or_else(|| {
            Err(DomainError::MemberNotFound {
                type_name: format!("super({}, {})", graph.name(after), graph.name(ty)),
                member: member.to_string(),
            })
        })
    }

    /// Types whose `member` runs when every override calls `super()` first,
    /// in the order the calls are entered (most derived first).
    pub fn cooperative_chain(&mut self, ty: TypeId, member: &str) -> DomainResult<Vec<TypeId>> {
        let graph = self.graph();
        let chain: Vec<TypeId> = self
            .linearize(ty)?
            .iter()
            .filter(|&t| graph.node(t).members.contains(member))
            .collect();
        if chain.is_empty() {
            return Err(DomainError::MemberNotFound {
                type_name: graph.name(ty).to_string(),
                member: member.to_string(),
            });
        }
        Ok(chain)
    }

    /// Order in which the bodies of a cooperative chain finish (base first).
    pub fn completion_order(&mut self, ty: TypeId, member: &str) -> DomainResult<Vec<TypeId>> {
        let mut chain = self.cooperative_chain(ty, member)?;
        chain.reverse();
        Ok(chain)
    }
}
