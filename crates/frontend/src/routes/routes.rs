use contracts::domain::a001_booking::BookingStatus;
use leptos::prelude::*;
use leptos_router::components::{Redirect, Route, Router, Routes};
use leptos_router::path;

use super::pages::{DashboardPage, NotFoundPage, SectionPlaceholderPage, UnauthorizedPage};
use crate::domain::a001_booking::ui::list::BookingList;
use crate::domain::a002_driver::ui::list::DriverList;
use crate::layout::AppShell;
use crate::system::permissions::ui::PermissionSettingsPage;
use crate::system::permissions::RequirePermission;

/// Route table. Every `/admin` page sits behind the permission guard; the
/// catch-all renders menu entries that have no page of their own.
#[component]
pub fn AppRoutes() -> impl IntoView {
    view! {
        <Router>
            <AppShell>
                <Routes fallback=|| view! { <NotFoundPage /> }>
                    <Route path=path!("/") view=|| view! { <Redirect path="/admin/dashboard" /> } />
                    <Route path=path!("/unauthorized") view=UnauthorizedPage />
                    <Route
                        path=path!("/admin/dashboard")
                        view=|| view! { <RequirePermission><DashboardPage /></RequirePermission> }
                    />
                    <Route
                        path=path!("/admin/bookings")
                        view=|| view! { <RequirePermission><BookingList /></RequirePermission> }
                    />
                    <Route
                        path=path!("/admin/bookings/pending")
                        view=|| view! {
                            <RequirePermission>
                                <BookingList status=BookingStatus::Pending />
                            </RequirePermission>
                        }
                    />
                    <Route
                        path=path!("/admin/bookings/completed")
                        view=|| view! {
                            <RequirePermission>
                                <BookingList status=BookingStatus::Completed />
                            </RequirePermission>
                        }
                    />
                    <Route
                        path=path!("/admin/bookings/cancelled")
                        view=|| view! {
                            <RequirePermission>
                                <BookingList status=BookingStatus::Cancelled />
                            </RequirePermission>
                        }
                    />
                    <Route
                        path=path!("/admin/drivers")
                        view=|| view! { <RequirePermission><DriverList /></RequirePermission> }
                    />
                    <Route
                        path=path!("/admin/settings/permissions")
                        view=|| view! { <RequirePermission><PermissionSettingsPage /></RequirePermission> }
                    />
                    <Route
                        path=path!("/admin/*any")
                        view=|| view! { <RequirePermission><SectionPlaceholderPage /></RequirePermission> }
                    />
                </Routes>
            </AppShell>
        </Router>
    }
}
