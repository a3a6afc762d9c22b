mod book;

pub use self::book::*;

pub trait Applier<Event> {
    fn apply(&mut self, event: Event);
}
