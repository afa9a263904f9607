/// An explicit "nothing selected" state, kept apart from "loaded but empty".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Selection<T> {
    #[default]
    Unselected,
    Selected(T),
}

impl<T> Selection<T> {
    pub fn is_selected(&self) -> bool {
        matches!(self, Self::Selected(_))
    }

    pub fn as_ref(&self) -> Selection<&T> {
        match self {
            Self::Selected(value) => Selection::Selected(value),
            Self::Unselected => Selection::Unselected,
        }
    }

    pub fn selected(&self) -> Option<&T> {
        match self {
            Self::Selected(value) => Some(value),
            Self::Unselected => None,
        }
    }

    pub fn is<Q>(&self, other: &Q) -> bool
    where
        T: PartialEq<Q>,
        Q: ?Sized,
    {
        matches!(self, Self::Selected(value) if value == other)
    }
}

impl<T> From<Option<T>> for Selection<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Self::Selected(value),
            None => Self::Unselected,
        }
    }
}
