use super::{path::Path, PathSegment, TypeInfo};
use crate::ast::*;

pub(crate) mod private {
    use super::{VisitFlow, VisitInfo, Visitor};

    pub trait VisitNodeWithInfo<'a>: Sized {
        fn visit_with_info<'b, C, V: Visitor<'a, C>>(
            &'a self,
            ctx: &'b mut C,
            visitor: &'b mut V,
            info: &mut VisitInfo<'a>,
        ) -> VisitFlow;
    }
}

/// A visitor signal that is returned from [Visitor] callbacks to alter the flow of traversal.
///
/// The default callbacks all return `VisitFlow::Next`, which continues the depth-first traversal. The
/// other signals may be used to skip over a node in a `before_` callback or to abort traversal
/// entirely without visiting any more AST Nodes.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum VisitFlow {
    /// Continue visiting nodes as usual.
    Next,
    /// Abort the traversal without performing any subsequent visits.
    Break,
    /// Skip over the current node without performing any deeper traversal.
    /// (Only applies to `enter_` callbacks)
    Skip,
}

/// Information on the position of the currently visited node that's passed to every callback.
///
/// `path` leads from the visited root node to the current node. When traversal was started with
/// [`VisitNode::visit_with_types`], `types` describes the schema types around the current node.
#[derive(Debug, Default)]
pub struct VisitInfo<'a> {
    pub path: Path,
    pub types: TypeInfo<'a>,
}

/// Trait for a visitor that carries methods that are called as callback while AST nodes
/// implementing the visitor pattern are traversed.
///
/// While the AST is traversed in depth-first order, callbacks that are prefixed with `enter_` are
/// called from top-to-bottom while the traversal is recursing, while callbacks that are prefixed
/// with `leave_` are called from bottom-to-top while the traversal is returning.
///
/// All callbacks have a default no-op implementation that returns `VisitFlow::Next`. The
/// [`VisitFlow`] signals are returned from callbacks to alter the traversal and either continue it
/// (`Next`), skip over a node during an `enter_` callback with (`Skip`), or abort traversal
/// entirely (`Break`).
///
/// The visitor must implement the [Visitor] trait which may also define a custom context structure
/// that can be passed to the `visit` method. By default the context is an empty unit `()`.
///
/// This pattern is applicable to any AST node that implements the [`VisitNode`] trait.
pub trait Visitor<'a, Context = ()>: Sized {
    /// Called when a [Document] is visited and before its child nodes are visited.
    fn enter_document(
        &mut self,
        _ctx: &mut Context,
        _document: &'a Document<'a>,
        _info: &VisitInfo<'a>,
    ) -> VisitFlow {
        VisitFlow::Next
    }
    /// Called after a [Document] and its child nodes were visited.
    fn leave_document(
        &mut self,
        _ctx: &mut Context,
        _document: &'a Document<'a>,
        _info: &VisitInfo<'a>,
    ) -> VisitFlow {
        VisitFlow::Next
    }

    /// Called when an [`OperationDefinition`] node is visited and before its child nodes are visited.
    fn enter_operation(
        &mut self,
        _ctx: &mut Context,
        _operation: &'a OperationDefinition<'a>,
        _info: &VisitInfo<'a>,
    ) -> VisitFlow {
        VisitFlow::Next
    }
    /// Called after an [`OperationDefinition`] and its child node were visited.
    fn leave_operation(
        &mut self,
        _ctx: &mut Context,
        _operation: &'a OperationDefinition<'a>,
        _info: &VisitInfo<'a>,
    ) -> VisitFlow {
        VisitFlow::Next
    }

    /// Called when a [`FragmentDefinition`] node is visited and before its child nodes are visited.
    fn enter_fragment(
        &mut self,
        _ctx: &mut Context,
        _fragment: &'a FragmentDefinition<'a>,
        _info: &VisitInfo<'a>,
    ) -> VisitFlow {
        VisitFlow::Next
    }
    /// Called after a [`FragmentDefinition`] node and its child nodes were visited.
    fn leave_fragment(
        &mut self,
        _ctx: &mut Context,
        _fragment: &'a FragmentDefinition<'a>,
        _info: &VisitInfo<'a>,
    ) -> VisitFlow {
        VisitFlow::Next
    }

    /// Called when a [`VariableDefinition`] node is visited and before its child nodes are visited.
    fn enter_variable_definition(
        &mut self,
        _ctx: &mut Context,
        _var_def: &'a VariableDefinition<'a>,
        _info: &VisitInfo<'a>,
    ) -> VisitFlow {
        VisitFlow::Next
    }
    /// Called after a [`VariableDefinition`] node and its child nodes were visited.
    fn leave_variable_definition(
        &mut self,
        _ctx: &mut Context,
        _var_def: &'a VariableDefinition<'a>,
        _info: &VisitInfo<'a>,
    ) -> VisitFlow {
        VisitFlow::Next
    }

    /// Called when a [`SelectionSet`] node is visited and before its child nodes are visited.
    fn enter_selection_set(
        &mut self,
        _ctx: &mut Context,
        _selection_set: &'a SelectionSet<'a>,
        _info: &VisitInfo<'a>,
    ) -> VisitFlow {
        VisitFlow::Next
    }
    /// Called after a [`SelectionSet`] node and its child nodes were visited.
    fn leave_selection_set(
        &mut self,
        _ctx: &mut Context,
        _selection_set: &'a SelectionSet<'a>,
        _info: &VisitInfo<'a>,
    ) -> VisitFlow {
        VisitFlow::Next
    }

    /// Called when a [`FragmentSpread`] node is visited and before its child nodes are visited.
    fn enter_fragment_spread(
        &mut self,
        _ctx: &mut Context,
        _fragment_spread: &'a FragmentSpread<'a>,
        _info: &VisitInfo<'a>,
    ) -> VisitFlow {
        VisitFlow::Next
    }
    /// Called after a [`FragmentSpread`] node and its child nodes were visited.
    fn leave_fragment_spread(
        &mut self,
        _ctx: &mut Context,
        _fragment_spread: &'a FragmentSpread<'a>,
        _info: &VisitInfo<'a>,
    ) -> VisitFlow {
        VisitFlow::Next
    }

    /// Called when an [`InlineFragment`] node is visited and before its child nodes are visited.
    fn enter_inline_fragment(
        &mut self,
        _ctx: &mut Context,
        _inline_fragment: &'a InlineFragment<'a>,
        _info: &VisitInfo<'a>,
    ) -> VisitFlow {
        VisitFlow::Next
    }
    /// Called after an [`InlineFragment`] node and its child nodes were visited.
    fn leave_inline_fragment(
        &mut self,
        _ctx: &mut Context,
        _inline_fragment: &'a InlineFragment<'a>,
        _info: &VisitInfo<'a>,
    ) -> VisitFlow {
        VisitFlow::Next
    }

    /// Called when a [Field] node is visited and before its child nodes are visited.
    fn enter_field(
        &mut self,
        _ctx: &mut Context,
        _field: &'a Field<'a>,
        _info: &VisitInfo<'a>,
    ) -> VisitFlow {
        VisitFlow::Next
    }
    /// Called after a [Field] node and its child nodes were visited.
    fn leave_field(
        &mut self,
        _ctx: &mut Context,
        _field: &'a Field<'a>,
        _info: &VisitInfo<'a>,
    ) -> VisitFlow {
        VisitFlow::Next
    }

    /// Called when a [Directive] node is visited and before its child nodes are visited.
    fn enter_directive(
        &mut self,
        _ctx: &mut Context,
        _directive: &'a Directive<'a>,
        _info: &VisitInfo<'a>,
    ) -> VisitFlow {
        VisitFlow::Next
    }
    /// Called after a [Directive] node and its child nodes were visited.
    fn leave_directive(
        &mut self,
        _ctx: &mut Context,
        _directive: &'a Directive<'a>,
        _info: &VisitInfo<'a>,
    ) -> VisitFlow {
        VisitFlow::Next
    }

    /// Called when an [Argument] node is visited and before its child nodes are visited.
    fn enter_argument(
        &mut self,
        _ctx: &mut Context,
        _argument: &'a Argument<'a>,
        _info: &VisitInfo<'a>,
    ) -> VisitFlow {
        VisitFlow::Next
    }
    /// Called after an [Argument] node and its child nodes were visited.
    fn leave_argument(
        &mut self,
        _ctx: &mut Context,
        _argument: &'a Argument<'a>,
        _info: &VisitInfo<'a>,
    ) -> VisitFlow {
        VisitFlow::Next
    }
}

/// Trait for visiting AST Nodes of a GraphQL language document in depth-first order using a
/// custom visitor.
///
/// The visitor must implement the [Visitor] trait which may also define a custom context structure
/// that can be passed to the `visit` method.
pub trait VisitNode<'a>: Sized + private::VisitNodeWithInfo<'a> {
    /// Visit a GraphQL AST node tree recursively in depth-first order with a given visitor.
    ///
    /// The visitor must implement the [Visitor] trait which may also define a custom context structure
    /// that can be passed to the `visit` method. By default the context is an empty unit `()`.
    fn visit<'b, C, V: Visitor<'a, C>>(&'a self, ctx: &'b mut C, visitor: &'b mut V) -> VisitFlow {
        let mut info = VisitInfo::default();
        self.visit_with_info(ctx, visitor, &mut info)
    }

    /// Visit a GraphQL AST node tree like `visit` while tracking schema types in
    /// [`VisitInfo::types`].
    fn visit_with_types<'b, C, V: Visitor<'a, C>>(
        &'a self,
        types: TypeInfo<'a>,
        ctx: &'b mut C,
        visitor: &'b mut V,
    ) -> VisitFlow {
        let mut info = VisitInfo {
            path: Path::default(),
            types,
        };
        self.visit_with_info(ctx, visitor, &mut info)
    }
}

impl<'a, T: private::VisitNodeWithInfo<'a>> VisitNode<'a> for T {}

impl<'a> private::VisitNodeWithInfo<'a> for Argument<'a> {
    #[inline]
    fn visit_with_info<'b, C, V: Visitor<'a, C>>(
        &'a self,
        ctx: &'b mut C,
        visitor: &'b mut V,
        info: &mut VisitInfo<'a>,
    ) -> VisitFlow {
        info.types.enter_argument(self);
        let flow = match visitor.enter_argument(ctx, self, info) {
            VisitFlow::Next => visitor.leave_argument(ctx, self, info),
            flow => flow,
        };
        info.types.leave_argument();
        flow
    }
}

impl<'a> private::VisitNodeWithInfo<'a> for Arguments<'a> {
    #[inline]
    fn visit_with_info<'b, C, V: Visitor<'a, C>>(
        &'a self,
        ctx: &'b mut C,
        visitor: &'b mut V,
        info: &mut VisitInfo<'a>,
    ) -> VisitFlow {
        for (index, argument) in self.children.iter().enumerate() {
            info.path.push(PathSegment::Index(index));
            if let VisitFlow::Break = argument.visit_with_info(ctx, visitor, info) {
                return VisitFlow::Break;
            }
            info.path.pop();
        }
        VisitFlow::Next
    }
}

impl<'a> private::VisitNodeWithInfo<'a> for Directive<'a> {
    #[inline]
    fn visit_with_info<'b, C, V: Visitor<'a, C>>(
        &'a self,
        ctx: &'b mut C,
        visitor: &'b mut V,
        info: &mut VisitInfo<'a>,
    ) -> VisitFlow {
        info.types.enter_directive(self);
        let flow = visitor.enter_directive(ctx, self, info);
        let flow = if let VisitFlow::Next = flow {
            info.path.push(PathSegment::Arguments);
            if self.arguments.visit_with_info(ctx, visitor, info) == VisitFlow::Break {
                return VisitFlow::Break;
            }
            info.path.pop();

            visitor.leave_directive(ctx, self, info)
        } else {
            flow
        };
        info.types.leave_directive();
        flow
    }
}

impl<'a> private::VisitNodeWithInfo<'a> for Directives<'a> {
    #[inline]
    fn visit_with_info<'b, C, V: Visitor<'a, C>>(
        &'a self,
        ctx: &'b mut C,
        visitor: &'b mut V,
        info: &mut VisitInfo<'a>,
    ) -> VisitFlow {
        for (index, directive) in self.children.iter().enumerate() {
            info.path.push(PathSegment::Index(index));
            if directive.visit_with_info(ctx, visitor, info) == VisitFlow::Break {
                return VisitFlow::Break;
            }
            info.path.pop();
        }
        VisitFlow::Next
    }
}

impl<'a> private::VisitNodeWithInfo<'a> for VariableDefinition<'a> {
    #[inline]
    fn visit_with_info<'b, C, V: Visitor<'a, C>>(
        &'a self,
        ctx: &'b mut C,
        visitor: &'b mut V,
        info: &mut VisitInfo<'a>,
    ) -> VisitFlow {
        let flow = visitor.enter_variable_definition(ctx, self, info);
        if let VisitFlow::Next = flow {
            info.path.push(PathSegment::Directives);
            if self.directives.visit_with_info(ctx, visitor, info) == VisitFlow::Break {
                return VisitFlow::Break;
            }
            info.path.pop();

            visitor.leave_variable_definition(ctx, self, info)
        } else {
            flow
        }
    }
}

impl<'a> private::VisitNodeWithInfo<'a> for VariableDefinitions<'a> {
    #[inline]
    fn visit_with_info<'b, C, V: Visitor<'a, C>>(
        &'a self,
        ctx: &'b mut C,
        visitor: &'b mut V,
        info: &mut VisitInfo<'a>,
    ) -> VisitFlow {
        for (index, var_def) in self.children.iter().enumerate() {
            info.path.push(PathSegment::Index(index));
            if var_def.visit_with_info(ctx, visitor, info) == VisitFlow::Break {
                return VisitFlow::Break;
            }
            info.path.pop();
        }
        VisitFlow::Next
    }
}

impl<'a> private::VisitNodeWithInfo<'a> for Field<'a> {
    #[inline]
    fn visit_with_info<'b, C, V: Visitor<'a, C>>(
        &'a self,
        ctx: &'b mut C,
        visitor: &'b mut V,
        info: &mut VisitInfo<'a>,
    ) -> VisitFlow {
        info.types.enter_field(self);
        let flow = visitor.enter_field(ctx, self, info);
        let flow = if let VisitFlow::Next = flow {
            info.path.push(PathSegment::Arguments);
            if self.arguments.visit_with_info(ctx, visitor, info) == VisitFlow::Break {
                return VisitFlow::Break;
            }
            info.path.pop();

            info.path.push(PathSegment::Directives);
            if self.directives.visit_with_info(ctx, visitor, info) == VisitFlow::Break {
                return VisitFlow::Break;
            }
            info.path.pop();

            // Leaf fields have no selection set to enter
            if !self.selection_set.is_empty() {
                info.path.push(PathSegment::SelectionSet);
                if self.selection_set.visit_with_info(ctx, visitor, info) == VisitFlow::Break {
                    return VisitFlow::Break;
                }
                info.path.pop();
            }

            visitor.leave_field(ctx, self, info)
        } else {
            flow
        };
        info.types.leave_field();
        flow
    }
}

impl<'a> private::VisitNodeWithInfo<'a> for FragmentSpread<'a> {
    #[inline]
    fn visit_with_info<'b, C, V: Visitor<'a, C>>(
        &'a self,
        ctx: &'b mut C,
        visitor: &'b mut V,
        info: &mut VisitInfo<'a>,
    ) -> VisitFlow {
        let flow = visitor.enter_fragment_spread(ctx, self, info);
        if let VisitFlow::Next = flow {
            info.path.push(PathSegment::Directives);
            if self.directives.visit_with_info(ctx, visitor, info) == VisitFlow::Break {
                return VisitFlow::Break;
            }
            info.path.pop();

            visitor.leave_fragment_spread(ctx, self, info)
        } else {
            flow
        }
    }
}

impl<'a> private::VisitNodeWithInfo<'a> for InlineFragment<'a> {
    #[inline]
    fn visit_with_info<'b, C, V: Visitor<'a, C>>(
        &'a self,
        ctx: &'b mut C,
        visitor: &'b mut V,
        info: &mut VisitInfo<'a>,
    ) -> VisitFlow {
        info.types.enter_inline_fragment(self);
        let flow = visitor.enter_inline_fragment(ctx, self, info);
        let flow = if let VisitFlow::Next = flow {
            info.path.push(PathSegment::Directives);
            if self.directives.visit_with_info(ctx, visitor, info) == VisitFlow::Break {
                return VisitFlow::Break;
            }
            info.path.pop();

            info.path.push(PathSegment::SelectionSet);
            if self.selection_set.visit_with_info(ctx, visitor, info) == VisitFlow::Break {
                return VisitFlow::Break;
            }
            info.path.pop();

            visitor.leave_inline_fragment(ctx, self, info)
        } else {
            flow
        };
        info.types.leave_type();
        flow
    }
}

impl<'a> private::VisitNodeWithInfo<'a> for SelectionSet<'a> {
    #[inline]
    fn visit_with_info<'b, C, V: Visitor<'a, C>>(
        &'a self,
        ctx: &'b mut C,
        visitor: &'b mut V,
        info: &mut VisitInfo<'a>,
    ) -> VisitFlow {
        info.types.enter_selection_set();
        let flow = visitor.enter_selection_set(ctx, self, info);
        let flow = if let VisitFlow::Next = flow {
            for (index, selection) in self.selections.iter().enumerate() {
                info.path.push(PathSegment::Index(index));
                let flow = match selection {
                    Selection::Field(field) => field.visit_with_info(ctx, visitor, info),
                    Selection::FragmentSpread(spread) => spread.visit_with_info(ctx, visitor, info),
                    Selection::InlineFragment(fragment) => {
                        fragment.visit_with_info(ctx, visitor, info)
                    }
                };
                if flow == VisitFlow::Break {
                    return VisitFlow::Break;
                }
                info.path.pop();
            }
            visitor.leave_selection_set(ctx, self, info)
        } else {
            flow
        };
        info.types.leave_selection_set();
        flow
    }
}

impl<'a> private::VisitNodeWithInfo<'a> for FragmentDefinition<'a> {
    #[inline]
    fn visit_with_info<'b, C, V: Visitor<'a, C>>(
        &'a self,
        ctx: &'b mut C,
        visitor: &'b mut V,
        info: &mut VisitInfo<'a>,
    ) -> VisitFlow {
        info.types.enter_fragment(self);
        let flow = visitor.enter_fragment(ctx, self, info);
        let flow = if let VisitFlow::Next = flow {
            info.path.push(PathSegment::Directives);
            if self.directives.visit_with_info(ctx, visitor, info) == VisitFlow::Break {
                return VisitFlow::Break;
            }
            info.path.pop();

            info.path.push(PathSegment::SelectionSet);
            if self.selection_set.visit_with_info(ctx, visitor, info) == VisitFlow::Break {
                return VisitFlow::Break;
            }
            info.path.pop();

            visitor.leave_fragment(ctx, self, info)
        } else {
            flow
        };
        info.types.leave_type();
        flow
    }
}

impl<'a> private::VisitNodeWithInfo<'a> for OperationDefinition<'a> {
    #[inline]
    fn visit_with_info<'b, C, V: Visitor<'a, C>>(
        &'a self,
        ctx: &'b mut C,
        visitor: &'b mut V,
        info: &mut VisitInfo<'a>,
    ) -> VisitFlow {
        info.types.enter_operation(self);
        let flow = visitor.enter_operation(ctx, self, info);
        let flow = if let VisitFlow::Next = flow {
            info.path.push(PathSegment::VariableDefinitions);
            if self
                .variable_definitions
                .visit_with_info(ctx, visitor, info)
                == VisitFlow::Break
            {
                return VisitFlow::Break;
            }
            info.path.pop();

            info.path.push(PathSegment::Directives);
            if self.directives.visit_with_info(ctx, visitor, info) == VisitFlow::Break {
                return VisitFlow::Break;
            }
            info.path.pop();

            info.path.push(PathSegment::SelectionSet);
            if self.selection_set.visit_with_info(ctx, visitor, info) == VisitFlow::Break {
                return VisitFlow::Break;
            }
            info.path.pop();

            visitor.leave_operation(ctx, self, info)
        } else {
            flow
        };
        info.types.leave_type();
        flow
    }
}

impl<'a> private::VisitNodeWithInfo<'a> for Document<'a> {
    #[inline]
    fn visit_with_info<'b, C, V: Visitor<'a, C>>(
        &'a self,
        ctx: &'b mut C,
        visitor: &'b mut V,
        info: &mut VisitInfo<'a>,
    ) -> VisitFlow {
        let flow = visitor.enter_document(ctx, self, info);
        if let VisitFlow::Next = flow {
            for (index, selection) in self.definitions.iter().enumerate() {
                info.path.push(PathSegment::Index(index));
                let flow = match selection {
                    Definition::Operation(operation) => {
                        operation.visit_with_info(ctx, visitor, info)
                    }
                    Definition::Fragment(fragment) => fragment.visit_with_info(ctx, visitor, info),
                };
                if flow == VisitFlow::Break {
                    return VisitFlow::Break;
                }
                info.path.pop();
            }
            visitor.leave_document(ctx, self, info)
        } else {
            flow
        }
    }
}
