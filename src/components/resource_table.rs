// ============================================================================
// RESOURCE TABLE - tabla genérica para los listados de la consola
// ============================================================================

use yew::prelude::*;
use yew_router::prelude::*;

use crate::models::TableRow;
use crate::routes::Route;
use crate::services::ApiError;

#[derive(Properties, PartialEq)]
pub struct ResourceTableProps<T: PartialEq> {
    pub title: AttrValue,
    pub rows: Option<Vec<T>>,
    #[prop_or_default]
    pub loading: bool,
    #[prop_or_default]
    pub error: Option<ApiError>,
    /// Sin callback no se muestra el botón de borrar
    #[prop_or_default]
    pub on_delete: Option<Callback<String>>,
    /// Enlace de detalle por fila (recibe el id)
    #[prop_or_default]
    pub detail: Option<Callback<String, Route>>,
    #[prop_or(AttrValue::Static("Open"))]
    pub detail_label: AttrValue,
    /// Acciones extra por fila (recibe el id)
    #[prop_or_default]
    pub row_actions: Option<Callback<String, Html>>,
    #[prop_or_default]
    pub children: Children,
}

#[function_component(ResourceTable)]
pub fn resource_table<T>(props: &ResourceTableProps<T>) -> Html
where
    T: TableRow + PartialEq + 'static,
{
    let show_actions = has_actions(props);

    let body = match (&props.rows, &props.error) {
        (Some(rows), _) if rows.is_empty() => html! {
            <tr><td class="table-empty" colspan={(T::COLUMNS.len() + 1).to_string()}>{"Nothing here yet"}</td></tr>
        },
        (Some(rows), _) => rows.iter().map(|row| render_row(row, props)).collect::<Html>(),
        (None, Some(error)) => html! {
            <tr><td class="table-error" colspan={(T::COLUMNS.len() + 1).to_string()}>{error_message(error)}</td></tr>
        },
        (None, None) => html! {
            <tr><td class="table-loading" colspan={(T::COLUMNS.len() + 1).to_string()}>{"Loading…"}</td></tr>
        },
    };

    html! {
        <section class="resource-section">
            <div class="section-header">
                <h2>{props.title.clone()}</h2>
                if props.loading && props.rows.is_some() {
                    <span class="refreshing">{"Refreshing…"}</span>
                }
            </div>
            {props.children.clone()}
            <table class="resource-table">
                <thead>
                    <tr>
                        { for T::COLUMNS.iter().map(|column| html! { <th>{*column}</th> }) }
                        if show_actions {
                            <th></th>
                        }
                    </tr>
                </thead>
                <tbody>{body}</tbody>
            </table>
        </section>
    }
}

fn render_row<T: TableRow + PartialEq>(row: &T, props: &ResourceTableProps<T>) -> Html {
    let id = row.row_id().to_string();
    let delete = props.on_delete.as_ref().map(|on_delete| {
        let (on_delete, id) = (on_delete.clone(), id.clone());
        Callback::from(move |_: MouseEvent| on_delete.emit(id.clone()))
    });

    html! {
        <tr key={id.clone()}>
            { for row.cells().into_iter().map(|cell| html! { <td>{cell}</td> }) }
            if has_actions(props) {
                <td class="row-actions">
                    if let Some(detail) = &props.detail {
                        <Link<Route> to={detail.emit(id.clone())}>{props.detail_label.clone()}</Link<Route>>
                    }
                    if let Some(actions) = &props.row_actions {
                        {actions.emit(id.clone())}
                    }
                    if let Some(delete) = delete {
                        <button class="btn-danger" onclick={delete}>{"Delete"}</button>
                    }
                </td>
            }
        </tr>
    }
}

fn has_actions<T: PartialEq>(props: &ResourceTableProps<T>) -> bool {
    props.on_delete.is_some() || props.detail.is_some() || props.row_actions.is_some()
}

/// Texto para errores de consulta mostrados en la tabla
pub fn error_message(error: &ApiError) -> String {
    match error {
        ApiError::Http { status: 404, .. } => "Not found.".to_string(),
        ApiError::Network(_) => "Network error. Check your connection.".to_string(),
        other => other
            .server_message()
            .unwrap_or(crate::utils::GENERIC_ERROR_MESSAGE)
            .to_string(),
    }
}
