use super::ast::*;
use bumpalo::collections::Vec;

/// Trait for creating empty values of AST nodes whose lists are allocated in an arena.
pub trait DefaultIn<'a> {
    fn default_in(arena: &'a bumpalo::Bump) -> Self;
}

impl<'a, T> DefaultIn<'a> for T
where
    T: Default,
{
    fn default_in(_ctx: &'a bumpalo::Bump) -> Self {
        Self::default()
    }
}

impl<'a> DefaultIn<'a> for Document<'a> {
    fn default_in(arena: &'a bumpalo::Bump) -> Self {
        Document {
            definitions: Vec::new_in(arena),
            size_hint: 0,
        }
    }
}

impl<'a> DefaultIn<'a> for VariableDefinitions<'a> {
    fn default_in(arena: &'a bumpalo::Bump) -> Self {
        VariableDefinitions {
            children: Vec::new_in(arena),
        }
    }
}

impl<'a> DefaultIn<'a> for Arguments<'a> {
    fn default_in(arena: &'a bumpalo::Bump) -> Self {
        Arguments {
            children: Vec::new_in(arena),
        }
    }
}

impl<'a> DefaultIn<'a> for Directives<'a> {
    fn default_in(arena: &'a bumpalo::Bump) -> Self {
        Directives {
            children: Vec::new_in(arena),
        }
    }
}

impl<'a> DefaultIn<'a> for SelectionSet<'a> {
    fn default_in(arena: &'a bumpalo::Bump) -> Self {
        SelectionSet {
            selections: Vec::new_in(arena),
        }
    }
}

impl<'a> From<Field<'a>> for Selection<'a> {
    #[inline]
    fn from(x: Field<'a>) -> Self {
        Selection::Field(x)
    }
}

impl<'a> From<OperationDefinition<'a>> for Definition<'a> {
    #[inline]
    fn from(x: OperationDefinition<'a>) -> Self {
        Definition::Operation(x)
    }
}

impl<'a> From<FragmentDefinition<'a>> for Definition<'a> {
    #[inline]
    fn from(x: FragmentDefinition<'a>) -> Self {
        Definition::Fragment(x)
    }
}
