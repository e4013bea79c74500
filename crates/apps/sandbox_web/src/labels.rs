#[cfg(target_arch = "wasm32")]
mod imp {
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;

    use gpu::LabelPlacement;
    use scene::Scene;

    /// Mirrors the scene's floating labels into absolutely positioned
    /// DOM nodes under the given container. Children are recreated only
    /// when the label count changes; per-frame work is text and style
    /// updates.
    pub fn update_labels(
        container_id: &str,
        scene: &Scene,
        placements: &[LabelPlacement],
    ) -> Result<(), JsValue> {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return Ok(());
        };
        let Some(container) = document.get_element_by_id(container_id) else {
            return Ok(());
        };

        let children = container.children();
        if children.length() as usize != scene.labels().len() {
            container.set_inner_html("");
            for _ in scene.labels() {
                let node = document.create_element("div")?;
                node.set_class_name("floating-label");
                container.append_child(&node)?;
            }
        }

        let children = container.children();
        for placement in placements {
            let Some(node) = children.item(placement.label_index as u32) else {
                continue;
            };
            let node: web_sys::HtmlElement = node.dyn_into()?;
            let style = node.style();
            match placement.screen {
                Some([x, y]) => {
                    node.set_inner_text(&scene.labels()[placement.label_index].text);
                    style.set_property("left", &format!("{x:.1}px"))?;
                    style.set_property("top", &format!("{y:.1}px"))?;
                    style.set_property("display", "block")?;
                }
                None => {
                    style.set_property("display", "none")?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod imp {
    use wasm_bindgen::prelude::JsValue;

    use gpu::LabelPlacement;
    use scene::Scene;

    pub fn update_labels(
        _container_id: &str,
        _scene: &Scene,
        _placements: &[LabelPlacement],
    ) -> Result<(), JsValue> {
        Ok(())
    }
}

pub use imp::update_labels;
