//! Marker attributes are source-only; they are removed before the
//! processed module is emitted back.

use syn::ItemMod;
use syn::visit_mut::{self, VisitMut};

use crate::parse::attributes::is_marker;

struct StripMarkers;

impl VisitMut for StripMarkers {
    fn visit_item_struct_mut(&mut self, item: &mut syn::ItemStruct) {
        item.attrs.retain(|attr| !is_marker(attr));
        visit_mut::visit_item_struct_mut(self, item);
    }

    fn visit_item_enum_mut(&mut self, item: &mut syn::ItemEnum) {
        item.attrs.retain(|attr| !is_marker(attr));
        visit_mut::visit_item_enum_mut(self, item);
    }

    fn visit_item_static_mut(&mut self, item: &mut syn::ItemStatic) {
        item.attrs.retain(|attr| !is_marker(attr));
        visit_mut::visit_item_static_mut(self, item);
    }

    fn visit_impl_item_fn_mut(&mut self, item: &mut syn::ImplItemFn) {
        item.attrs.retain(|attr| !is_marker(attr));
        visit_mut::visit_impl_item_fn_mut(self, item);
    }
}

pub fn strip_markers(module: &mut ItemMod) {
    StripMarkers.visit_item_mod_mut(module);
}

#[cfg(test)]
mod tests {
    use super::*;
    use quote::quote;
    use syn::parse_quote;

    #[test]
    fn removes_every_marker_attribute() {
        let mut module: ItemMod = parse_quote! {
            mod app {
                #[exception(cache_no_args)]
                #[derive(Debug)]
                pub struct QueueClosed;

                impl QueueClosed {
                    #[constructor]
                    pub fn fresh() -> Self {
                        QueueClosed
                    }
                }

                #[cached]
                #[or_throw(Ticket)]
                pub static QUEUE_CLOSED: QueueClosed = QueueClosed;
            }
        };

        strip_markers(&mut module);
        let rendered = quote!(#module).to_string();
        assert!(!rendered.contains("exception"));
        assert!(!rendered.contains("constructor"));
        assert!(!rendered.contains("cached"));
        assert!(!rendered.contains("or_throw"));
        // Foreign attributes survive.
        assert!(rendered.contains("derive"));
    }
}
