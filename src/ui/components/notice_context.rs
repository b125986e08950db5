use dioxus::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

/// Blocking notice shown over the whole window until acknowledged
#[derive(Clone)]
pub struct NoticeContext {
    pub is_open: Signal<bool>,
    title: Rc<RefCell<String>>,
    message: Rc<RefCell<String>>,
}

impl Default for NoticeContext {
    fn default() -> Self {
        Self::new()
    }
}

impl NoticeContext {
    pub fn new() -> Self {
        Self {
            is_open: Signal::new(false),
            title: Rc::new(RefCell::new(String::new())),
            message: Rc::new(RefCell::new(String::new())),
        }
    }

    pub fn title(&self) -> String {
        self.title.borrow().clone()
    }

    pub fn message(&self) -> String {
        self.message.borrow().clone()
    }

    pub fn show(&self, title: impl Into<String>, message: impl Into<String>) {
        *self.title.borrow_mut() = title.into();
        *self.message.borrow_mut() = message.into();
        let mut is_open = self.is_open;
        is_open.set(true);
    }

    pub fn hide(&self) {
        let mut is_open = self.is_open;
        is_open.set(false);
    }
}
