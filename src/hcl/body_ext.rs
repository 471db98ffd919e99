//! Body-level read/write operations for the HCL token model (spec §4.1).
//!
//! These are the primitive operations migrators and transform helpers are
//! built from: get/set/remove an attribute, append/remove a nested block,
//! enumerate nested blocks by type. Everything here works by rebuilding the
//! body's structure list rather than mutating in place, which keeps the
//! implementation independent of whichever in-place mutation API a given
//! `hcl-edit` version exposes, at the cost of an extra allocation per edit —
//! bodies in this domain are small (single resource blocks), so that cost is
//! immaterial.

use hcl_edit::expr::Expression;
use hcl_edit::structure::{Attribute, Block, Body, Structure};

pub trait BodyExt {
    fn get_attribute(&self, name: &str) -> Option<&Attribute>;
    fn has_attribute(&self, name: &str) -> bool;
    fn set_attribute(&mut self, name: &str, expr: Expression);
    fn remove_attribute(&mut self, name: &str) -> Option<Attribute>;
    fn blocks_of_type<'a>(&'a self, ty: &str) -> Vec<&'a Block>;
    fn remove_blocks_of_type(&mut self, ty: &str) -> Vec<Block>;
    fn append_block(&mut self, block: Block);
    fn attribute_order(&self) -> Vec<String>;
}

impl BodyExt for Body {
    fn get_attribute(&self, name: &str) -> Option<&Attribute> {
        self.iter().find_map(|s| match s {
            Structure::Attribute(attr) if attr.key.as_str() == name => Some(attr),
            _ => None,
        })
    }

    fn has_attribute(&self, name: &str) -> bool {
        self.get_attribute(name).is_some()
    }

    fn set_attribute(&mut self, name: &str, expr: Expression) {
        for mut structure in self.iter_mut() {
            if let Some(mut attr) = structure.as_attribute_mut() {
                if attr.key.as_str() == name {
                    *attr.value_mut() = expr;
                    return;
                }
            }
        }
        self.push(Attribute::new(hcl_edit::Ident::new(name), expr));
    }

    fn remove_attribute(&mut self, name: &str) -> Option<Attribute> {
        let mut removed = None;
        let kept: Vec<Structure> = std::mem::take(self)
            .into_iter()
            .filter_map(|structure| match structure {
                Structure::Attribute(attr) if attr.key.as_str() == name && removed.is_none() => {
                    removed = Some(attr);
                    None
                }
                other => Some(other),
            })
            .collect();
        *self = Body::from_iter(kept);
        removed
    }

    fn blocks_of_type<'a>(&'a self, ty: &str) -> Vec<&'a Block> {
        self.iter()
            .filter_map(|s| match s {
                Structure::Block(block) if block.ident.as_str() == ty => Some(block),
                _ => None,
            })
            .collect()
    }

    fn remove_blocks_of_type(&mut self, ty: &str) -> Vec<Block> {
        let mut removed = Vec::new();
        let kept: Vec<Structure> = std::mem::take(self)
            .into_iter()
            .filter_map(|structure| match structure {
                Structure::Block(block) if block.ident.as_str() == ty => {
                    removed.push(block);
                    None
                }
                other => Some(other),
            })
            .collect();
        *self = Body::from_iter(kept);
        removed
    }

    fn append_block(&mut self, block: Block) {
        self.push(block);
    }

    fn attribute_order(&self) -> Vec<String> {
        self.iter()
            .filter_map(|s| match s {
                Structure::Attribute(attr) => Some(attr.key.as_str().to_string()),
                _ => None,
            })
            .collect()
    }
}
