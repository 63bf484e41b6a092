//! Отменяемый запрос, привязанный к жизненному циклу модального окна.
//!
//! В слоте живёт не больше одного запроса: новый `restart` отменяет
//! предыдущий, `cancel` вызывается при закрытии окна.

use std::cell::RefCell;
use web_sys::{AbortController, AbortSignal};

#[derive(Default)]
pub struct RequestSlot {
    controller: RefCell<Option<AbortController>>,
}

impl RequestSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Отменяет текущий запрос и готовит сигнал для следующего.
    ///
    /// `None`, если браузер не умеет `AbortController` - тогда запрос просто
    /// не отменяется, а устаревший ответ отсекает состояние окна.
    pub fn restart(&self) -> Option<AbortSignal> {
        self.cancel();
        let controller = AbortController::new().ok()?;
        let signal = controller.signal();
        *self.controller.borrow_mut() = Some(controller);
        Some(signal)
    }

    pub fn cancel(&self) {
        if let Some(controller) = self.controller.borrow_mut().take() {
            controller.abort();
        }
    }
}
