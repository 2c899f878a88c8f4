//! The built-in knowledge base content.

use indexmap::IndexMap;

use crate::{Branch, Category, KnowledgeBase, SolutionTree};

fn branch(message: &str, options: &[&str]) -> Branch {
    Branch {
        message: message.to_string(),
        options: if options.is_empty() {
            None
        } else {
            Some(options.iter().map(|s| s.to_string()).collect())
        },
    }
}

fn tree(question: &str, options: &[&str], responses: Vec<(&str, Branch)>) -> SolutionTree {
    SolutionTree {
        question: question.to_string(),
        options: options.iter().map(|s| s.to_string()).collect(),
        responses: responses
            .into_iter()
            .map(|(label, branch)| (label.to_string(), branch))
            .collect(),
    }
}

fn category(keywords: &[&str], solution: SolutionTree) -> Category {
    Category {
        keywords: keywords.iter().map(|s| s.to_string()).collect(),
        solution,
    }
}

/// Build the default knowledge base. Insertion order here is the
/// category-detection tie-break and must not be reordered casually.
pub(crate) fn builtin() -> KnowledgeBase {
    let mut categories = IndexMap::new();

    categories.insert(
        "Login Issues".to_string(),
        category(
            &[
                "login",
                "signin",
                "password",
                "username",
                "access",
                "authenticate",
                "forgot",
            ],
            tree(
                "Are you having trouble with your password?",
                &[
                    "Yes, forgot password",
                    "Yes, password not working",
                    "No, other login issue",
                ],
                vec![
                    (
                        "Yes, forgot password",
                        branch(
                            "No worries! Here's how to reset your password:\n\n\
                             1. Go to the login page\n\
                             2. Click 'Forgot Password'\n\
                             3. Enter your email address\n\
                             4. Check your email for the reset link\n\
                             5. Follow the instructions in the email\n\n\
                             Did this help resolve your issue?",
                            &["Yes, problem solved!", "No, still having issues"],
                        ),
                    ),
                    (
                        "Yes, password not working",
                        branch(
                            "Let's troubleshoot this:\n\n\
                             1. Make sure Caps Lock is off\n\
                             2. Check for extra spaces\n\
                             3. Try typing your password in a text editor first\n\
                             4. Clear your browser cache\n\
                             5. Try incognito/private mode\n\n\
                             Are you able to log in now?",
                            &["Yes, it worked!", "No, still can't login"],
                        ),
                    ),
                    (
                        "No, other login issue",
                        branch(
                            "I see. Let me help you with other common login issues:\n\n\
                             - Account locked: wait 15 minutes and try again\n\
                             - Browser issues: try a different browser\n\
                             - Email not verified: check your email for the verification link\n\
                             - Account suspended: this needs admin review\n\n\
                             Which of these sounds like your issue?",
                            &[
                                "Account locked",
                                "Browser issues",
                                "Email not verified",
                                "Account suspended",
                                "None of these",
                            ],
                        ),
                    ),
                ],
            ),
        ),
    );

    categories.insert(
        "Payment Problems".to_string(),
        category(
            &[
                "payment",
                "billing",
                "charge",
                "invoice",
                "credit card",
                "transaction",
                "refund",
            ],
            tree(
                "What type of payment issue are you experiencing?",
                &[
                    "Payment failed",
                    "Wrong amount charged",
                    "Refund request",
                    "Billing question",
                ],
                vec![
                    (
                        "Payment failed",
                        branch(
                            "Payment failures can happen for several reasons:\n\n\
                             - Insufficient funds\n\
                             - Expired card\n\
                             - Incorrect card details\n\
                             - Bank security block\n\
                             - Network timeout\n\n\
                             Please check your card details and try again. If it still \
                             fails, contact your bank.\n\n\
                             Did this help?",
                            &["Yes, payment went through", "No, still failing"],
                        ),
                    ),
                    (
                        "Wrong amount charged",
                        branch(
                            "I understand your concern about billing. Here's what to check:\n\n\
                             - Review your subscription plan\n\
                             - Check for any additional services\n\
                             - Look for taxes or fees\n\
                             - Verify the billing period\n\n\
                             For billing disputes, I'll need to create a ticket for our \
                             billing team.\n\n\
                             Should I create a ticket for you?",
                            &["Yes, create ticket", "No, I found the issue"],
                        ),
                    ),
                    (
                        "Refund request",
                        branch(
                            "Refund requests need to be reviewed by our billing team. \
                             I'll create a ticket with the following information:\n\n\
                             - Transaction details\n\
                             - Reason for refund\n\
                             - Account information\n\n\
                             Shall I proceed with creating a refund request ticket?",
                            &["Yes, create refund ticket", "No, cancel request"],
                        ),
                    ),
                ],
            ),
        ),
    );

    categories.insert(
        "Account Settings".to_string(),
        category(
            &[
                "profile",
                "settings",
                "account",
                "information",
                "update",
                "change",
                "edit",
            ],
            tree(
                "What would you like to update in your account?",
                &[
                    "Personal information",
                    "Email/Password",
                    "Notification settings",
                    "Delete account",
                ],
                vec![
                    (
                        "Personal information",
                        branch(
                            "To update your personal information:\n\n\
                             1. Go to Account Settings\n\
                             2. Click on 'Profile Information'\n\
                             3. Edit the fields you want to change\n\
                             4. Click 'Save Changes'\n\n\
                             Note: some changes may require email verification.\n\n\
                             Were you able to update your information?",
                            &["Yes, updated successfully", "No, having trouble"],
                        ),
                    ),
                    (
                        "Email/Password",
                        branch(
                            "To change your email or password:\n\n\
                             For email:\n\
                             1. Go to Account Settings > Email\n\
                             2. Enter the new email and confirm\n\
                             3. Verify via the email link\n\n\
                             For password:\n\
                             1. Go to Account Settings > Security\n\
                             2. Click 'Change Password'\n\
                             3. Enter your current and new password\n\n\
                             Did this work for you?",
                            &["Yes, changed successfully", "No, need help"],
                        ),
                    ),
                    (
                        "Delete account",
                        branch(
                            "Account deletion is permanent and cannot be undone. This will:\n\n\
                             - Delete all your data\n\
                             - Cancel active subscriptions\n\
                             - Remove access to services\n\n\
                             This requires manual processing. Should I create a ticket \
                             for account deletion?",
                            &["Yes, create deletion ticket", "No, keep my account"],
                        ),
                    ),
                ],
            ),
        ),
    );

    categories.insert(
        "Technical Support".to_string(),
        category(
            &[
                "error",
                "bug",
                "crash",
                "slow",
                "not working",
                "technical",
                "issue",
            ],
            tree(
                "What technical issue are you experiencing?",
                &[
                    "Website not loading",
                    "Error messages",
                    "Performance issues",
                    "Feature not working",
                ],
                vec![
                    (
                        "Website not loading",
                        branch(
                            "Let's troubleshoot website loading issues:\n\n\
                             1. Check your internet connection\n\
                             2. Try refreshing the page (Ctrl+F5)\n\
                             3. Clear browser cache and cookies\n\
                             4. Disable browser extensions\n\
                             5. Try incognito/private mode\n\
                             6. Use a different browser\n\n\
                             Is the website loading now?",
                            &["Yes, it's working", "No, still not loading"],
                        ),
                    ),
                    (
                        "Error messages",
                        branch(
                            "Error messages can help us identify the issue. Common solutions:\n\n\
                             - Refresh the page\n\
                             - Check your internet connection\n\
                             - Clear browser cache\n\
                             - Update your browser\n\
                             - Disable ad blockers\n\n\
                             If you're still getting errors, I'll need the exact error \
                             message to help further.\n\n\
                             Are you still seeing errors?",
                            &["No, errors gone", "Yes, still getting errors"],
                        ),
                    ),
                    (
                        "Performance issues",
                        branch(
                            "Slow performance can be improved by:\n\n\
                             - Closing unused browser tabs\n\
                             - Clearing browser cache\n\
                             - Checking internet speed\n\
                             - Disabling browser extensions\n\
                             - Restarting your browser\n\
                             - Using a wired connection\n\n\
                             Is the performance better now?",
                            &["Yes, much faster", "No, still slow"],
                        ),
                    ),
                ],
            ),
        ),
    );

    KnowledgeBase::from_categories(categories)
}
