use crate::components::Layout;
use crate::guards::{PublicOnly, Replace, RequireSession};
use crate::pages::{
    BlogCreatePage, BlogDetailPage, BlogListPage, LoginPage, NotFoundPage, ProfilePage,
    ProfileSetupPage,
};
use crate::session::SessionProvider;
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Clone, Debug, PartialEq, Routable)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/blog")]
    BlogList,
    #[at("/blog/create")]
    BlogCreate,
    #[at("/blog/:id")]
    BlogDetail { id: i64 },
    #[at("/login")]
    Login,
    #[at("/profile")]
    Profile,
    #[at("/profile-setup")]
    ProfileSetup,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(route: Route) -> Html {
    match route {
        Route::Home => html! { <Replace to={Route::BlogList} /> },
        Route::BlogList => html! { <BlogListPage /> },
        Route::BlogCreate => html! {
            <RequireSession><BlogCreatePage /></RequireSession>
        },
        Route::BlogDetail { id } => html! { <BlogDetailPage {id} /> },
        Route::Login => html! {
            <PublicOnly><LoginPage /></PublicOnly>
        },
        Route::Profile => html! {
            <RequireSession><ProfilePage /></RequireSession>
        },
        // The setup flow resolves its own session
        Route::ProfileSetup => html! { <ProfileSetupPage /> },
        Route::NotFound => html! { <NotFoundPage /> },
    }
}

#[function_component(App)]
pub fn app() -> Html {
    html! {
        <BrowserRouter>
            <SessionProvider>
                <Layout>
                    <Switch<Route> render={switch} />
                </Layout>
            </SessionProvider>
        </BrowserRouter>
    }
}
