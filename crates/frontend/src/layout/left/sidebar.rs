//! Сворачиваемый сайдбар и отступ основного контента.
//!
//! Состояние «открыт» живёт в DOM (класс `active` у `.sidebar`), поэтому
//! каждый обработчик заново читает его через [`SidebarView`], считает новое
//! состояние чистой [`SidebarLayout`] и записывает результат обратно.

use web_sys::{Element, Event, Node};

use crate::shared::config::ui_config;
use crate::shared::dom;

pub const SIDEBAR_SELECTOR: &str = ".sidebar";
pub const MAIN_CONTENT_SELECTOR: &str = ".main-content";
pub const MENU_TOGGLE_SELECTOR: &str = ".menu-toggle";
pub const OPEN_CLASS: &str = "active";

/// Чистая модель раскладки.
///
/// Методы возвращают новый отступ контента в px; `None` - отступ не трогаем.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SidebarLayout {
    pub open: bool,
    breakpoint_px: f64,
    sidebar_width_px: f64,
}

impl SidebarLayout {
    pub fn new(open: bool, breakpoint_px: f64, sidebar_width_px: f64) -> Self {
        Self {
            open,
            breakpoint_px,
            sidebar_width_px,
        }
    }

    pub fn is_narrow(&self, viewport_width: f64) -> bool {
        viewport_width <= self.breakpoint_px
    }

    fn open_margin(&self) -> f64 {
        self.sidebar_width_px
    }

    /// Кнопка меню
    pub fn toggle(&mut self, viewport_width: f64) -> Option<f64> {
        self.open = !self.open;
        if !self.is_narrow(viewport_width) {
            return None;
        }
        Some(if self.open { self.open_margin() } else { 0.0 })
    }

    /// Клик где-то на странице
    pub fn outside_click(
        &mut self,
        viewport_width: f64,
        inside_sidebar: bool,
        on_toggle: bool,
    ) -> Option<f64> {
        if !self.is_narrow(viewport_width) || inside_sidebar || on_toggle {
            return None;
        }
        self.open = false;
        Some(0.0)
    }

    /// Изменение размера окна
    pub fn resize(&mut self, viewport_width: f64) -> Option<f64> {
        if !self.is_narrow(viewport_width) {
            // На десктопе сайдбар всегда виден, флаг мобильного меню сбрасываем
            self.open = false;
            return Some(self.open_margin());
        }
        if self.open {
            None
        } else {
            Some(0.0)
        }
    }

    /// Начальное состояние при загрузке страницы
    pub fn initial(&self, viewport_width: f64) -> Option<f64> {
        self.is_narrow(viewport_width).then_some(0.0)
    }
}

/// DOM-представление сайдбара. Элементы перезапрашиваются при каждом обращении.
pub struct SidebarView;

impl SidebarView {
    pub fn sidebar(&self) -> Option<Element> {
        dom::query(SIDEBAR_SELECTOR)
    }

    pub fn main_content(&self) -> Option<Element> {
        dom::query(MAIN_CONTENT_SELECTOR)
    }

    /// Текущая модель; `None`, если на странице нет сайдбара или контента
    pub fn layout(&self) -> Option<SidebarLayout> {
        let sidebar = self.sidebar()?;
        self.main_content()?;
        let config = ui_config();
        Some(SidebarLayout::new(
            sidebar.class_list().contains(OPEN_CLASS),
            config.mobile_breakpoint_px,
            config.sidebar_width_px,
        ))
    }

    pub fn apply(&self, layout: &SidebarLayout, margin: Option<f64>) {
        if let Some(sidebar) = self.sidebar() {
            let classes = sidebar.class_list();
            let _ = if layout.open {
                classes.add_1(OPEN_CLASS)
            } else {
                classes.remove_1(OPEN_CLASS)
            };
        }
        if let (Some(margin), Some(content)) = (margin, self.main_content()) {
            dom::set_style(&content, "margin-left", &format_margin(margin));
        }
    }

    fn update(&self, f: impl FnOnce(&mut SidebarLayout) -> Option<f64>) {
        let Some(mut layout) = self.layout() else {
            return;
        };
        let margin = f(&mut layout);
        self.apply(&layout, margin);
    }
}

fn format_margin(margin: f64) -> String {
    if margin == 0.0 {
        "0".to_string()
    } else {
        format!("{}px", margin)
    }
}

/// Переключение сайдбара (кнопка меню)
pub fn toggle_sidebar() {
    let width = dom::viewport_width();
    SidebarView.update(|layout| layout.toggle(width));
}

/// Глобальный обработчик кликов: кнопка меню или клик вне сайдбара
pub fn handle_click(event: &Event) {
    let on_toggle = dom::closest_from_event(event, MENU_TOGGLE_SELECTOR).is_some();
    if on_toggle {
        toggle_sidebar();
        return;
    }

    let view = SidebarView;
    let inside_sidebar = match (view.sidebar(), dom::event_target_element(event)) {
        (Some(sidebar), Some(target)) => {
            let target: &Node = &target;
            sidebar.contains(Some(target))
        }
        _ => false,
    };
    let width = dom::viewport_width();
    view.update(|layout| layout.outside_click(width, inside_sidebar, on_toggle));
}

pub fn handle_resize() {
    let width = dom::viewport_width();
    SidebarView.update(|layout| layout.resize(width));
}

/// Начальный отступ и подписка на события
pub fn init_sidebar() {
    let width = dom::viewport_width();
    SidebarView.update(|layout| layout.initial(width));

    dom::listen_document("click", |event| handle_click(&event));
    dom::listen_window("resize", |_| handle_resize());
}
