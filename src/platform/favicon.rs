//! Animated favicon
//!
//! Cycles the `#dynamic-favicon` link through its frames on a browser
//! interval for as long as the page lives.

use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::HtmlLinkElement;

use super::dom;
use crate::consts::FAVICON_PERIOD_MS;

pub struct FaviconCycler {
    interval_id: Option<i32>,
    _tick: Option<Closure<dyn FnMut()>>,
}

impl FaviconCycler {
    /// Start cycling. Inert if the link element is missing or there is
    /// nothing to cycle.
    pub fn start(frames: &[String]) -> Self {
        let inert = Self {
            interval_id: None,
            _tick: None,
        };
        if frames.len() < 2 {
            return inert;
        }
        let link = dom::document()
            .and_then(|d| d.get_element_by_id("dynamic-favicon"))
            .and_then(|el| el.dyn_into::<HtmlLinkElement>().ok());
        let (Some(link), Some(window)) = (link, web_sys::window()) else {
            return inert;
        };

        let frames = frames.to_vec();
        let index = Rc::new(Cell::new(0usize));
        let tick = Closure::wrap(Box::new(move || {
            let next = (index.get() + 1) % frames.len();
            index.set(next);
            link.set_href(&frames[next]);
        }) as Box<dyn FnMut()>);

        let interval_id = window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                tick.as_ref().unchecked_ref(),
                FAVICON_PERIOD_MS as i32,
            )
            .ok();
        Self {
            interval_id,
            _tick: Some(tick),
        }
    }

    pub fn stop(&mut self) {
        if let (Some(id), Some(window)) = (self.interval_id.take(), web_sys::window()) {
            window.clear_interval_with_handle(id);
            log::debug!("Favicon interval cleared");
        }
        self._tick = None;
    }
}

impl Drop for FaviconCycler {
    fn drop(&mut self) {
        self.stop();
    }
}
