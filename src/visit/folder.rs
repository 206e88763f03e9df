use crate::ast::*;
use bumpalo::collections::Vec;

use super::{PathSegment, VisitInfo};
use crate::error::Result;

pub(crate) mod private {
    use super::{ASTContext, Folder, Result, VisitInfo};

    pub trait FoldNode<'a>: Sized {
        fn fold_with_ctx<'b, F: Folder<'a>>(
            &self,
            info: &mut VisitInfo<'a>,
            ctx: &'a ASTContext,
            folder: &'b mut F,
        ) -> Result<Self>;
    }
}

/// Trait for a folder that carries methods that are called as callback while AST nodes
/// implementing the folder pattern are traversed and edited.
///
/// A Folder is used to traverse an GraphQL AST top-to-bottom, depth-first and to replace the AST's
/// nodes by calling the Folder's callbacks and replacing the AST nodes one by one. After an AST
/// Node is folded it's an entirely new copy, separate from the input AST, which remains untouched.
///
/// All callbacks have a default no-op implementation that return the input AST Node and hence only
/// create an unchanged copy of the AST. Nodes are removed by returning a list callback's node
/// without them, e.g. returning a [`SelectionSet`] with fewer selections from `selection_set`.
///
/// Arguments and their values are copied as they are and have no callbacks of their own.
///
/// This pattern is applicable to any AST node that implements the [`FoldNode`] trait.
pub trait Folder<'a> {
    /// Folds an [`OperationDefinition`] into a new node as part of a new, transformed AST, before
    /// the Operation is folded recursively
    #[inline]
    fn enter_operation(
        &mut self,
        _ctx: &'a ASTContext,
        operation: OperationDefinition<'a>,
        _info: &VisitInfo<'a>,
    ) -> Result<OperationDefinition<'a>> {
        Ok(operation)
    }

    /// Folds an [`OperationDefinition`] into a new node as part of a new, transformed AST, after
    /// the Operation has been folded.
    #[inline]
    fn leave_operation(
        &mut self,
        _ctx: &'a ASTContext,
        operation: OperationDefinition<'a>,
        _info: &VisitInfo<'a>,
    ) -> Result<OperationDefinition<'a>> {
        Ok(operation)
    }

    /// Folds a [`FragmentDefinition`] into a new node as part of a new, transformed AST, before the
    /// FragmentDefinition is folded recursively.
    #[inline]
    fn enter_fragment(
        &mut self,
        _ctx: &'a ASTContext,
        fragment: FragmentDefinition<'a>,
        _info: &VisitInfo<'a>,
    ) -> Result<FragmentDefinition<'a>> {
        Ok(fragment)
    }

    /// Folds a [`FragmentDefinition`] into a new node as part of a new, transformed AST, after the
    /// FragmentDefinition has been folded.
    #[inline]
    fn leave_fragment(
        &mut self,
        _ctx: &'a ASTContext,
        fragment: FragmentDefinition<'a>,
        _info: &VisitInfo<'a>,
    ) -> Result<FragmentDefinition<'a>> {
        Ok(fragment)
    }

    /// Folds a [`SelectionSet`] into a new node as part of a new, transformed AST, before its
    /// selections are folded.
    #[inline]
    fn selection_set(
        &mut self,
        _ctx: &'a ASTContext,
        selection_set: SelectionSet<'a>,
        _info: &VisitInfo<'a>,
    ) -> Result<SelectionSet<'a>> {
        Ok(selection_set)
    }

    /// Folds a [`FragmentSpread`] node into a new node as part of a new, transformed AST.
    #[inline]
    fn fragment_spread(
        &mut self,
        _ctx: &'a ASTContext,
        fragment_spread: FragmentSpread<'a>,
        _info: &VisitInfo<'a>,
    ) -> Result<FragmentSpread<'a>> {
        Ok(fragment_spread)
    }

    /// Folds an [`InlineFragment`] into a new node as part of a new, transformed AST, before the
    /// InlineFragment is folded recursively.
    #[inline]
    fn enter_inline_fragment(
        &mut self,
        _ctx: &'a ASTContext,
        inline_fragment: InlineFragment<'a>,
        _info: &VisitInfo<'a>,
    ) -> Result<InlineFragment<'a>> {
        Ok(inline_fragment)
    }

    /// Folds an [`InlineFragment`] into a new node as part of a new, transformed AST, after the
    /// InlineFragment has been folded.
    #[inline]
    fn leave_inline_fragment(
        &mut self,
        _ctx: &'a ASTContext,
        inline_fragment: InlineFragment<'a>,
        _info: &VisitInfo<'a>,
    ) -> Result<InlineFragment<'a>> {
        Ok(inline_fragment)
    }

    /// Folds a [Field] into a new node as part of a new, transformed AST, before the Field is
    /// folded recursively.
    #[inline]
    fn enter_field(
        &mut self,
        _ctx: &'a ASTContext,
        field: Field<'a>,
        _info: &VisitInfo<'a>,
    ) -> Result<Field<'a>> {
        Ok(field)
    }

    /// Folds a [Field] into a new node as part of a new, transformed AST, after the field has been
    /// folded.
    #[inline]
    fn leave_field(
        &mut self,
        _ctx: &'a ASTContext,
        field: Field<'a>,
        _info: &VisitInfo<'a>,
    ) -> Result<Field<'a>> {
        Ok(field)
    }

    /// Folds a [Directives] node into a new node as part of a new, transformed AST.
    #[inline]
    fn directives(
        &mut self,
        _ctx: &'a ASTContext,
        directives: Directives<'a>,
        _info: &VisitInfo<'a>,
    ) -> Result<Directives<'a>> {
        Ok(directives)
    }
}

/// Trait for folding AST Nodes of a GraphQL language document in depth-first order using a
/// custom folder. This transforms the AST while creating a new copy of it.
///
/// The folder must implement the [Folder] trait.
pub trait FoldNode<'a>: private::FoldNode<'a> {
    /// Visit the GraphQL AST node tree recursively in depth-first order and create a transformed
    /// copy of it using the given folder. The folder must implement the [Folder] trait.
    ///
    /// This will return a [Result] containing a reference to the new copied AST Node allocated on
    /// the current AST Context's arena or an error.
    fn fold<'b, F: Folder<'a>>(
        &'a self,
        ctx: &'a ASTContext,
        folder: &'b mut F,
    ) -> Result<&'a Self> {
        let mut info = VisitInfo::default();
        Ok(ctx.alloc(self.fold_with_ctx(&mut info, ctx, folder)?))
    }
}

impl<'a, T: private::FoldNode<'a>> FoldNode<'a> for T {}

impl<'a> private::FoldNode<'a> for Directives<'a> {
    #[inline]
    fn fold_with_ctx<'b, F: Folder<'a>>(
        &self,
        info: &mut VisitInfo<'a>,
        ctx: &'a ASTContext,
        folder: &'b mut F,
    ) -> Result<Self> {
        folder.directives(ctx, self.clone(), info)
    }
}

impl<'a> private::FoldNode<'a> for Field<'a> {
    #[inline]
    fn fold_with_ctx<'b, F: Folder<'a>>(
        &self,
        info: &mut VisitInfo<'a>,
        ctx: &'a ASTContext,
        folder: &'b mut F,
    ) -> Result<Self> {
        let field = folder.enter_field(ctx, self.clone(), info)?;

        info.path.push(PathSegment::Directives);
        let directives = field.directives.fold_with_ctx(info, ctx, folder)?;
        info.path.pop();

        info.path.push(PathSegment::SelectionSet);
        let selection_set = field.selection_set.fold_with_ctx(info, ctx, folder)?;
        info.path.pop();

        let field = Field {
            directives,
            selection_set,
            ..field
        };
        folder.leave_field(ctx, field, info)
    }
}

impl<'a> private::FoldNode<'a> for FragmentSpread<'a> {
    #[inline]
    fn fold_with_ctx<'b, F: Folder<'a>>(
        &self,
        info: &mut VisitInfo<'a>,
        ctx: &'a ASTContext,
        folder: &'b mut F,
    ) -> Result<Self> {
        let spread = folder.fragment_spread(ctx, self.clone(), info)?;

        info.path.push(PathSegment::Directives);
        let directives = spread.directives.fold_with_ctx(info, ctx, folder)?;
        info.path.pop();

        Ok(FragmentSpread { directives, ..spread })
    }
}

impl<'a> private::FoldNode<'a> for InlineFragment<'a> {
    #[inline]
    fn fold_with_ctx<'b, F: Folder<'a>>(
        &self,
        info: &mut VisitInfo<'a>,
        ctx: &'a ASTContext,
        folder: &'b mut F,
    ) -> Result<Self> {
        let fragment = folder.enter_inline_fragment(ctx, self.clone(), info)?;

        info.path.push(PathSegment::Directives);
        let directives = fragment.directives.fold_with_ctx(info, ctx, folder)?;
        info.path.pop();

        info.path.push(PathSegment::SelectionSet);
        let selection_set = fragment.selection_set.fold_with_ctx(info, ctx, folder)?;
        info.path.pop();

        let fragment = InlineFragment {
            type_condition: fragment.type_condition,
            directives,
            selection_set,
            span: fragment.span,
        };
        folder.leave_inline_fragment(ctx, fragment, info)
    }
}

impl<'a> private::FoldNode<'a> for SelectionSet<'a> {
    #[inline]
    fn fold_with_ctx<'b, F: Folder<'a>>(
        &self,
        info: &mut VisitInfo<'a>,
        ctx: &'a ASTContext,
        folder: &'b mut F,
    ) -> Result<Self> {
        let selection_set = folder.selection_set(ctx, self.clone(), info)?;

        let mut new_selections = Vec::with_capacity_in(selection_set.selections.len(), &ctx.arena);
        for (index, selection) in selection_set.selections.iter().enumerate() {
            info.path.push(PathSegment::Index(index));
            let folded: Selection<'a> = match selection {
                Selection::Field(field) => field.fold_with_ctx(info, ctx, folder)?.into(),
                Selection::FragmentSpread(spread) => {
                    Selection::FragmentSpread(spread.fold_with_ctx(info, ctx, folder)?)
                }
                Selection::InlineFragment(fragment) => {
                    Selection::InlineFragment(fragment.fold_with_ctx(info, ctx, folder)?)
                }
            };
            info.path.pop();
            new_selections.push(folded);
        }

        Ok(SelectionSet {
            selections: new_selections,
        })
    }
}

impl<'a> private::FoldNode<'a> for FragmentDefinition<'a> {
    #[inline]
    fn fold_with_ctx<'b, F: Folder<'a>>(
        &self,
        info: &mut VisitInfo<'a>,
        ctx: &'a ASTContext,
        folder: &'b mut F,
    ) -> Result<Self> {
        let fragment = folder.enter_fragment(ctx, self.clone(), info)?;

        info.path.push(PathSegment::Directives);
        let directives = fragment.directives.fold_with_ctx(info, ctx, folder)?;
        info.path.pop();

        info.path.push(PathSegment::SelectionSet);
        let selection_set = fragment.selection_set.fold_with_ctx(info, ctx, folder)?;
        info.path.pop();

        let fragment = FragmentDefinition {
            directives,
            selection_set,
            ..fragment
        };
        folder.leave_fragment(ctx, fragment, info)
    }
}

impl<'a> private::FoldNode<'a> for OperationDefinition<'a> {
    #[inline]
    fn fold_with_ctx<'b, F: Folder<'a>>(
        &self,
        info: &mut VisitInfo<'a>,
        ctx: &'a ASTContext,
        folder: &'b mut F,
    ) -> Result<Self> {
        let operation = folder.enter_operation(ctx, self.clone(), info)?;

        info.path.push(PathSegment::Directives);
        let directives = operation.directives.fold_with_ctx(info, ctx, folder)?;
        info.path.pop();

        info.path.push(PathSegment::SelectionSet);
        let selection_set = operation.selection_set.fold_with_ctx(info, ctx, folder)?;
        info.path.pop();

        let operation = OperationDefinition {
            directives,
            selection_set,
            ..operation
        };
        folder.leave_operation(ctx, operation, info)
    }
}

impl<'a> private::FoldNode<'a> for Document<'a> {
    #[inline]
    fn fold_with_ctx<'b, F: Folder<'a>>(
        &self,
        info: &mut VisitInfo<'a>,
        ctx: &'a ASTContext,
        folder: &'b mut F,
    ) -> Result<Self> {
        let mut new_definitions = Vec::with_capacity_in(self.definitions.len(), &ctx.arena);
        for (index, definition) in self.definitions.iter().enumerate() {
            info.path.push(PathSegment::Index(index));
            let folded: Definition<'a> = match definition {
                Definition::Operation(operation) => {
                    operation.fold_with_ctx(info, ctx, folder)?.into()
                }
                Definition::Fragment(fragment) => fragment.fold_with_ctx(info, ctx, folder)?.into(),
            };
            info.path.pop();
            new_definitions.push(folded);
        }

        Ok(Document {
            definitions: new_definitions,
            size_hint: self.size_hint,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    struct DropTypename;

    impl<'a> Folder<'a> for DropTypename {
        fn selection_set(
            &mut self,
            ctx: &'a ASTContext,
            selection_set: SelectionSet<'a>,
            _info: &VisitInfo<'a>,
        ) -> Result<SelectionSet<'a>> {
            let mut selections = Vec::new_in(&ctx.arena);
            for selection in selection_set.selections.into_iter() {
                match selection.field() {
                    Some(field) if field.name == "__typename" => {}
                    _ => selections.push(selection),
                }
            }
            Ok(SelectionSet { selections })
        }

        fn directives(
            &mut self,
            ctx: &'a ASTContext,
            directives: Directives<'a>,
            _info: &VisitInfo<'a>,
        ) -> Result<Directives<'a>> {
            let mut children = Vec::new_in(&ctx.arena);
            for directive in directives.children.into_iter() {
                if directive.name != "live" {
                    children.push(directive);
                }
            }
            Ok(Directives { children })
        }
    }

    #[test]
    fn removes_selections_and_directives() {
        let ctx = ASTContext::new();
        let document = Document::parse(
            &ctx,
            "query @live { __typename user { __typename id @live ...F } } fragment F on User { __typename name }",
        )
        .unwrap();
        let folded = document.fold(&ctx, &mut DropTypename).unwrap();

        let operation = folded.operations().next().unwrap();
        assert!(operation.directives.is_empty());
        assert_eq!(operation.selection_set.selections.len(), 1);

        let user = operation.selection_set.selections[0].field().unwrap();
        let original = document.operations().next().unwrap().selection_set.selections[1]
            .field()
            .unwrap();
        assert_eq!(user.span, original.span);
        assert_eq!(user.selection_set.selections.len(), 2);
        let id = user.selection_set.selections[0].field().unwrap();
        assert!(id.directives.is_empty());

        let fragment = folded.fragments().next().unwrap();
        assert_eq!(fragment.selection_set.selections.len(), 1);

        // The original document is left untouched
        assert_eq!(document.operations().next().unwrap().selection_set.selections.len(), 2);
    }

    struct Fails;

    impl<'a> Folder<'a> for Fails {
        fn enter_field(
            &mut self,
            _ctx: &'a ASTContext,
            field: Field<'a>,
            info: &VisitInfo<'a>,
        ) -> Result<Field<'a>> {
            if field.name == "bad" {
                Err(Error::new(format!("bad field at {}", info.path), None))
            } else {
                Ok(field)
            }
        }
    }

    #[test]
    fn folder_errors_stop_folding() {
        let ctx = ASTContext::new();
        let document = Document::parse(&ctx, "{ a { bad } }").unwrap();
        let error = document.fold(&ctx, &mut Fails).unwrap_err();
        assert_eq!(error.message(), "bad field at 0.selectionSet.0.selectionSet.0");
    }
}
