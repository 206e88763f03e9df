use bumpalo::collections::Vec;

use crate::ast::*;
use crate::error::Result;
use crate::schema::{DirectiveLocation, Schema, SchemaDirective, SchemaInputField, TypeRef};
use crate::visit::{FoldNode, Folder, VisitInfo};

/// A transform that prepares a schema and documents for directives that clients handle
/// themselves and that a schema doesn't know about.
pub trait DirectiveTransform {
    /// Returns a schema that additionally defines the client-side directives.
    fn transform_schema<'a>(&self, ctx: &'a ASTContext, schema: &'a Schema<'a>)
        -> &'a Schema<'a>;

    /// Returns a copy of the document without the parts a server never sees.
    ///
    /// With `keep_tagged_fields`, client-side fields are kept and only lose their marker.
    fn transform_document<'a>(
        &self,
        ctx: &'a ASTContext,
        document: &'a Document<'a>,
        keep_tagged_fields: bool,
    ) -> Result<&'a Document<'a>>;
}

/// The `@client` and `@connection` directives of client-side caches.
///
/// Fields marked with `@client` only exist in a client's local state. They're deleted from
/// documents before validation, or kept without the directive when the caller asks for it.
#[derive(Debug, Default, Clone, Copy)]
pub struct ClientDirectives;

const CLIENT: &str = "client";
const CONNECTION: &str = "connection";

impl DirectiveTransform for ClientDirectives {
    fn transform_schema<'a>(
        &self,
        ctx: &'a ASTContext,
        schema: &'a Schema<'a>,
    ) -> &'a Schema<'a> {
        let mut client = SchemaDirective::new(ctx, CLIENT);
        client.locations.push(DirectiveLocation::Field);

        let string = ctx.alloc(TypeRef::Type("String"));
        let mut connection = SchemaDirective::new(ctx, CONNECTION);
        connection.locations.push(DirectiveLocation::Field);
        connection.add_argument(
            ctx,
            SchemaInputField::new("key", ctx.alloc(TypeRef::NonNullType(string))),
        );
        connection.add_argument(
            ctx,
            SchemaInputField::new("filter", ctx.alloc(TypeRef::ListType(string))),
        );

        let schema = ctx.alloc(schema.with_directive(ctx, client));
        ctx.alloc(schema.with_directive(ctx, connection))
    }

    fn transform_document<'a>(
        &self,
        ctx: &'a ASTContext,
        document: &'a Document<'a>,
        keep_tagged_fields: bool,
    ) -> Result<&'a Document<'a>> {
        document.fold(ctx, &mut ClientFields { keep_tagged_fields })
    }
}

struct ClientFields {
    keep_tagged_fields: bool,
}

impl<'a> Folder<'a> for ClientFields {
    fn selection_set(
        &mut self,
        ctx: &'a ASTContext,
        selection_set: SelectionSet<'a>,
        _info: &VisitInfo<'a>,
    ) -> Result<SelectionSet<'a>> {
        if self.keep_tagged_fields {
            return Ok(selection_set);
        }
        let mut selections = Vec::new_in(&ctx.arena);
        for selection in selection_set.selections.into_iter() {
            match selection.field() {
                Some(field) if field.directives.has(CLIENT) => {}
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
        if !directives.has(CLIENT) {
            return Ok(directives);
        }
        let mut children = Vec::new_in(&ctx.arena);
        for directive in directives.children.into_iter() {
            if directive.name != CLIENT {
                children.push(directive);
            }
        }
        Ok(Directives { children })
    }
}
