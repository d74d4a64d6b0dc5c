use super::FullnessPolicy;

/// Full when any child policy is full. An empty `AnyOf` never fills.
///
/// Every callback reaches every child, so each keeps accurate state.
pub struct AnyOf<T> {
    policies: Vec<Box<dyn FullnessPolicy<T>>>,
}

/// Full when every child policy is full. An empty `AllOf` fills on every insert.
pub struct AllOf<T> {
    policies: Vec<Box<dyn FullnessPolicy<T>>>,
}

macro_rules! composite_policy {
    ($name:ident, $combine:ident) => {
        impl<T> $name<T> {
            pub fn new() -> Self {
                Self {
                    policies: Vec::new(),
                }
            }

            /// Adds a child policy.
            pub fn with<P>(mut self, policy: P) -> Self
            where
                P: FullnessPolicy<T> + 'static,
            {
                self.policies.push(Box::new(policy));
                self
            }

            pub fn len(&self) -> usize {
                self.policies.len()
            }

            pub fn is_empty(&self) -> bool {
                self.policies.is_empty()
            }
        }

        impl<T> Default for $name<T> {
            fn default() -> Self {
                Self::new()
            }
        }

        impl<T> FromIterator<Box<dyn FullnessPolicy<T>>> for $name<T> {
            fn from_iter<I: IntoIterator<Item = Box<dyn FullnessPolicy<T>>>>(iter: I) -> Self {
                Self {
                    policies: iter.into_iter().collect(),
                }
            }
        }

        impl<T> FullnessPolicy<T> for $name<T> {
            fn on_put(&mut self, item: &T) {
                for policy in &mut self.policies {
                    policy.on_put(item);
                }
            }

            fn is_full(&self) -> bool {
                self.policies.iter().$combine(|policy| policy.is_full())
            }

            fn on_drain(&mut self) {
                for policy in &mut self.policies {
                    policy.on_drain();
                }
            }
        }
    };
}

composite_policy!(AnyOf, any);
composite_policy!(AllOf, all);
