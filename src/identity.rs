use crate::question::UserId;

pub trait IdentityProvider {
    fn current_user(&self) -> Option<UserId>;
}

/// The signed-in user, if any. Owned by whoever composes the importer.
#[derive(Clone, Debug, Default)]
pub struct Session {
    user: Option<UserId>,
}

impl Session {
    pub fn new(user: Option<UserId>) -> Self {
        Session { user }
    }

    pub fn sign_in(&mut self, user: UserId) {
        self.user = Some(user);
    }

    pub fn sign_out(&mut self) {
        self.user = None;
    }
}

impl IdentityProvider for Session {
    fn current_user(&self) -> Option<UserId> {
        self.user.clone()
    }
}

impl<T: IdentityProvider + ?Sized> IdentityProvider for &T {
    fn current_user(&self) -> Option<UserId> {
        (**self).current_user()
    }
}
