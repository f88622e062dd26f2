use js_sys::{Array, Function, Object, Reflect};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement};

use crate::dom::{Dom, DomError, Keyframe, OnFinish, Rect, Timing, Viewport};

/// The live document. Stateless: every call goes straight to `web-sys`.
#[derive(Debug, Clone, Copy, Default)]
pub struct WebDom;

fn document() -> Result<Document, DomError> {
    web_sys::window().and_then(|window| window.document()).ok_or_else(|| DomError::Js("no document".to_owned()))
}

fn js_err(value: JsValue) -> DomError {
    DomError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
}

fn report(op: &str, result: Result<(), JsValue>) {
    if let Err(err) = result {
        log::debug!("{op} failed: {err:?}");
    }
}

fn keyframe_object(keyframe: &Keyframe) -> Result<Object, JsValue> {
    let object = Object::new();
    for (prop, value) in &keyframe.props {
        Reflect::set(&object, &JsValue::from_str(prop), &JsValue::from_str(value))?;
    }
    if let Some(offset) = keyframe.offset {
        Reflect::set(&object, &JsValue::from_str("offset"), &JsValue::from_f64(offset))?;
    }
    Ok(object)
}

impl Dom for WebDom {
    type Node = Element;

    fn attr(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn set_attr(&mut self, node: &Element, name: &str, value: &str) {
        report("setAttribute", node.set_attribute(name, value));
    }

    fn find_all(&self, root: &Element, class: &str) -> Vec<Element> {
        let found = root.get_elements_by_class_name(class);
        (0..found.length()).filter_map(|index| found.item(index)).collect()
    }

    fn add_class(&mut self, node: &Element, class: &str) {
        report("classList.add", node.class_list().add_1(class));
    }

    fn remove_class(&mut self, node: &Element, class: &str) {
        report("classList.remove", node.class_list().remove_1(class));
    }

    fn has_class(&self, node: &Element, class: &str) -> bool {
        node.class_list().contains(class)
    }

    fn set_style(&mut self, node: &Element, prop: &str, value: &str) {
        if let Some(html) = node.dyn_ref::<HtmlElement>() {
            report("style.setProperty", html.style().set_property(prop, value));
        }
    }

    fn remove_style(&mut self, node: &Element, prop: &str) {
        if let Some(html) = node.dyn_ref::<HtmlElement>()
            && let Err(err) = html.style().remove_property(prop)
        {
            log::debug!("style.removeProperty failed: {err:?}");
        }
    }

    fn reflow(&mut self, node: &Element) {
        // Reading a layout property flushes pending style changes.
        if let Some(html) = node.dyn_ref::<HtmlElement>() {
            std::hint::black_box(html.offset_width());
        }
    }

    fn rect(&self, node: &Element) -> Rect {
        let rect = node.get_bounding_client_rect();
        Rect::new(rect.left(), rect.top(), rect.width(), rect.height())
    }

    fn viewport(&self) -> Viewport {
        let dimension = |value: Result<JsValue, JsValue>| match value {
            Ok(value) => value.as_f64().unwrap_or(0.0),
            Err(_) => 0.0,
        };
        match web_sys::window() {
            Some(window) => Viewport { width: dimension(window.inner_width()), height: dimension(window.inner_height()) },
            None => Viewport { width: 0.0, height: 0.0 },
        }
    }

    fn create(&mut self, tag: &str) -> Result<Element, DomError> {
        document()?.create_element(tag).map_err(js_err)
    }

    fn clone_deep(&mut self, node: &Element) -> Result<Element, DomError> {
        node.clone_node_with_deep(true).map_err(js_err)?.dyn_into::<Element>().map_err(|_| DomError::Detached)
    }

    fn append(&mut self, parent: &Element, child: &Element) {
        if let Err(err) = parent.append_child(child) {
            log::debug!("appendChild failed: {err:?}");
        }
    }

    fn append_to_body(&mut self, child: &Element) {
        match document().map(|document| document.body()) {
            Ok(Some(body)) => {
                if let Err(err) = body.append_child(child) {
                    log::debug!("body.appendChild failed: {err:?}");
                }
            }
            _ => log::debug!("no document body to append to"),
        }
    }

    fn remove(&mut self, node: &Element) {
        node.remove();
    }

    fn is_connected(&self, node: &Element) -> bool {
        node.is_connected()
    }

    fn animate(
        &mut self,
        node: &Element,
        keyframes: &[Keyframe],
        timing: Timing,
        on_finish: OnFinish<Self>,
    ) -> Result<(), DomError> {
        let animate = Reflect::get(node, &JsValue::from_str("animate")).map_err(js_err)?;
        let Some(animate) = animate.dyn_ref::<Function>() else {
            return Err(DomError::AnimationUnsupported);
        };

        let frames = Array::new();
        for keyframe in keyframes {
            let frame = keyframe_object(keyframe).map_err(js_err)?;
            frames.push(&frame);
        }
        let options = Object::new();
        Reflect::set(&options, &JsValue::from_str("duration"), &JsValue::from_f64(timing.duration_ms)).map_err(js_err)?;
        Reflect::set(&options, &JsValue::from_str("easing"), &JsValue::from_str(timing.easing)).map_err(js_err)?;

        let animation = animate.call2(node, &frames, &options).map_err(js_err)?;
        let finished = Closure::once_into_js(move || on_finish(&mut WebDom));
        Reflect::set(&animation, &JsValue::from_str("onfinish"), &finished).map_err(js_err)?;
        Ok(())
    }
}
