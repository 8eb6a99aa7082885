//! JSON view of a GUI's state after the scripted clicks ran.

use mc_gui_core::{Area, CompositeGui};
use mc_gui_proto::item_stack::ItemStack;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Snapshot {
    pub kind: String,
    pub title: String,
    pub top_size: usize,
    pub total_size: usize,
    pub dirty: bool,
    pub components: Vec<ComponentSnapshot>,
    pub packets_sent: usize,
}

#[derive(Debug, Serialize)]
pub struct ComponentSnapshot {
    pub name: String,
    pub area: &'static str,
    pub offset: usize,
    pub width: usize,
    pub height: usize,
    pub rotation: i32,
    /// Logical row-major slots; `null` for empty ones.
    pub items: Vec<Option<ItemSnapshot>>,
}

#[derive(Debug, Serialize)]
pub struct ItemSnapshot {
    pub runtime_id: i32,
    pub count: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl From<&ItemStack> for ItemSnapshot {
    fn from(item: &ItemStack) -> Self {
        Self {
            runtime_id: item.runtime_id,
            count: item.count,
            name: item.meta.display_name.clone(),
        }
    }
}

impl Snapshot {
    pub fn capture(gui: &CompositeGui, packets_sent: usize) -> Self {
        let mut offset = 0;
        let components = gui
            .components()
            .map(|(name, area, component)| {
                let snapshot = ComponentSnapshot {
                    name: name.to_owned(),
                    area: match area {
                        Area::Top => "top",
                        Area::Bottom => "bottom",
                    },
                    offset,
                    width: component.width(),
                    height: component.height(),
                    rotation: component.rotation(),
                    items: component
                        .items()
                        .iter()
                        .map(|slot| slot.as_ref().map(ItemSnapshot::from))
                        .collect(),
                };
                offset += component.size();
                snapshot
            })
            .collect();
        Self {
            kind: gui.kind().to_string(),
            title: gui.title().to_owned(),
            top_size: gui.top_size(),
            total_size: gui.total_size(),
            dirty: gui.is_dirty(),
            components,
            packets_sent,
        }
    }
}

#[cfg(test)]
mod tests {
    use mc_gui_core::GuiKind;

    use super::*;

    #[test]
    fn offsets_follow_placement_order() {
        let mut gui = CompositeGui::new(GuiKind::Grindstone, "Grindstone").unwrap();
        gui.component_mut("result")
            .unwrap()
            .set(0, 0, Some(ItemStack::new(4, 2)))
            .unwrap();
        let snapshot = Snapshot::capture(&gui, 0);
        let offsets: Vec<_> = snapshot.components.iter().map(|c| c.offset).collect();
        assert_eq!(offsets, vec![0, 2, 3]);
        assert_eq!(snapshot.components[2].area, "bottom");

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["components"][1]["items"][0]["count"], 2);
        assert!(json["components"][0]["items"][0].is_null());
        assert_eq!(json["kind"], "grindstone");
    }
}
