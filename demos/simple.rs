use mockwire::*;

// Collaborator traits of the service under test

trait Repository: Send + Sync {
    fn find(&self, id: u32) -> Option<String>;
}

trait Notifier: Send + Sync {
    fn notify(&self, message: &str);
}

// Pre-created mocks, as a test fixture would declare them

struct RepositoryStub;

impl Repository for RepositoryStub {
    fn find(&self, id: u32) -> Option<String> {
        Some(format!("user-{id}"))
    }
}

struct NotifierStub;

impl Notifier for NotifierStub {
    fn notify(&self, message: &str) {
        println!("(stub) {message}");
    }
}

reflect_mock!(RepositoryStub; dyn Repository);
reflect_mock!(NotifierStub; dyn Notifier);

// The object under test, described to the engine by hand

#[derive(Default)]
struct UserService {
    repository: Option<Mock>,
    notifier: Option<Mock>,
}

impl UserService {
    fn greet(&self, id: u32) {
        let user = self
            .repository
            .as_ref()
            .and_then(|mock| mock.as_any().downcast_ref::<RepositoryStub>())
            .and_then(|repository| repository.find(id));
        let notifier = self
            .notifier
            .as_ref()
            .and_then(|mock| mock.as_any().downcast_ref::<NotifierStub>());
        if let (Some(user), Some(notifier)) = (user, notifier) {
            notifier.notify(&format!("hello {user}"));
        }
    }
}

impl InjectionTarget for UserService {
    fn marked_members(&self) -> Vec<MemberSite> {
        vec![
            MemberSite::new("repository", TypeKey::of::<dyn Repository>()),
            MemberSite::new("notifier", TypeKey::of::<dyn Notifier>()),
        ]
    }

    fn write_member(
        &mut self,
        site: &MemberSite,
        value: Option<Mock>,
    ) -> Result<(), InjectionError> {
        let Some(value) = value else { return Ok(()) };
        if !site.accepts_write() {
            return Ok(());
        }
        match site.name.as_str() {
            "repository" => self.repository = Some(value),
            "notifier" => self.notifier = Some(value),
            _ => {}
        }
        Ok(())
    }
}

fn main() -> Result<(), InjectionError> {
    let mocks = vec![
        MockHolder::of(RepositoryStub, "repository"),
        MockHolder::of(NotifierStub, "notifier"),
    ];

    // Build the object under test, then place the mocks into it.
    let class = ClassDescriptor::new("UserService")
        .with_constructor(Constructor::new(Vec::new(), |_| Ok(UserService::default())));
    let mut service = ClassInitializer::new().initialize(&class, &mocks)?;

    MockInjector::new(mocks).inject_to(&mut service)?;

    service.greet(7);

    Ok(())
}
