use crate::constants::*;
use starfield_core::Starfield;
use web_sys as web;

/// Optional on-page readouts of the interaction timers. Pages without the
/// elements pay nothing beyond the initial lookup.
pub struct DebugReadouts {
    misc: Option<web::Element>,
    ring: Option<web::Element>,
    speed: Option<web::Element>,
    poke: Option<web::Element>,
    last_ms: f64,
}

impl DebugReadouts {
    pub fn find(document: &web::Document) -> Self {
        Self {
            misc: document.get_element_by_id(DEBUG_MISC_ID),
            ring: document.get_element_by_id(DEBUG_RING_ID),
            speed: document.get_element_by_id(DEBUG_SPEED_ID),
            poke: document.get_element_by_id(DEBUG_POKE_ID),
            last_ms: f64::NEG_INFINITY,
        }
    }

    #[inline]
    fn is_empty(&self) -> bool {
        self.misc.is_none() && self.ring.is_none() && self.speed.is_none() && self.poke.is_none()
    }

    pub fn update(&mut self, now_ms: f64, starfield: &Starfield) {
        if self.is_empty() || now_ms - self.last_ms < DEBUG_REFRESH_MS {
            return;
        }
        self.last_ms = now_ms;

        let pointer = starfield.pointer();
        if let (Some(el), Some((mx, _))) = (&self.misc, starfield.sample_momentum()) {
            el.set_text_content(Some(&mx.to_string()));
        }
        if let Some(el) = &self.ring {
            el.set_text_content(Some(&format!("{:.3}", pointer.ring_timer)));
        }
        if let Some(el) = &self.speed {
            el.set_text_content(Some(&format!("{:.3}", pointer.energy)));
        }
        if let Some(el) = &self.poke {
            el.set_text_content(Some(&format!("{:.1}", pointer.poke_timer)));
        }
    }
}
